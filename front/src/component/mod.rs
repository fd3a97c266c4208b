mod expiry;
pub use expiry::ExpiryList;
mod resize;
pub use resize::ResizeControls;
mod upload;
pub use upload::UploadForm;
