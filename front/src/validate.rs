use crate::{error::UploadError, utils::MIB};

/// What a file category accepts. The byte limits are compiled in from
/// Limits.toml by the build script, see build.rs.
pub struct RuleSet {
    pub allowed: &'static [&'static str],
    pub max_bytes: u64,
    type_hint: &'static str,
}

pub static IMAGE_RULES: RuleSet = RuleSet {
    allowed: &["jpg", "jpeg", "png", "webp"],
    max_bytes: parse_env_bytes(env!("IMAGE_SIZE_LIMIT")),
    type_hint: "Allowed: JPG, JPEG, PNG, WEBP.",
};

pub static DOCUMENT_RULES: RuleSet = RuleSet {
    allowed: &["pdf"],
    max_bytes: parse_env_bytes(env!("DOCUMENT_SIZE_LIMIT")),
    type_hint: "Only PDF allowed.",
};

impl RuleSet {
    fn allows(&self, extension: &str) -> bool {
        self.allowed.contains(&extension)
    }

    fn max_mb(&self) -> u64 {
        self.max_bytes / (1024 * 1024)
    }
}

/// The lower-cased part after the last dot, empty when there is none.
pub fn extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// A document extension selects the document rules, everything else falls
/// back to the image rules. The category is never an explicit user choice.
pub fn rules_for(name: &str) -> &'static RuleSet {
    if DOCUMENT_RULES.allows(&extension(name)) {
        &DOCUMENT_RULES
    } else {
        &IMAGE_RULES
    }
}

pub fn check(name: &str, size: u64) -> Result<(), UploadError> {
    let rules = rules_for(name);

    if !rules.allows(&extension(name)) {
        return Err(UploadError::InvalidType {
            hint: rules.type_hint,
        });
    }

    if size > rules.max_bytes {
        return Err(UploadError::TooLarge {
            limit_mb: rules.max_mb(),
            size_mb: size as f64 / MIB,
        });
    }

    Ok(())
}

/// `accept` attribute for the file input, derived from the rule sets so the
/// markup can't drift from the validation.
pub fn accept() -> String {
    IMAGE_RULES
        .allowed
        .iter()
        .chain(DOCUMENT_RULES.allowed)
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

// The build script only emits digits, anything else aborts the compilation.
const fn parse_env_bytes(raw: &str) -> u64 {
    let bytes = raw.as_bytes();
    let mut value = 0u64;
    let mut index = 0;
    while index < bytes.len() {
        let digit = bytes[index];
        if digit < b'0' || digit > b'9' {
            panic!("expected a base 10 byte count");
        }
        value = value * 10 + (digit - b'0') as u64;
        index += 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_come_from_the_build_script() {
        assert_eq!(IMAGE_RULES.max_bytes, 12 * 1024 * 1024);
        assert_eq!(DOCUMENT_RULES.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn extension_is_lowercased_and_taken_after_the_last_dot() {
        assert_eq!(extension("photo.PNG"), "png");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("README"), "");
    }

    #[test]
    fn pdf_goes_through_the_document_rules() {
        assert!(std::ptr::eq(rules_for("report.pdf"), &DOCUMENT_RULES));
        assert!(std::ptr::eq(rules_for("report.PDF"), &DOCUMENT_RULES));
    }

    #[test]
    fn anything_else_goes_through_the_image_rules() {
        assert!(std::ptr::eq(rules_for("photo.png"), &IMAGE_RULES));
        assert!(std::ptr::eq(rules_for("archive.tar.gz"), &IMAGE_RULES));
        assert!(std::ptr::eq(rules_for("no_extension"), &IMAGE_RULES));
    }

    #[test]
    fn a_file_without_extension_is_rejected() {
        assert_eq!(
            check("README", 10).unwrap_err().to_string(),
            "❌ Invalid file type. Allowed: JPG, JPEG, PNG, WEBP."
        );
    }

    #[test]
    fn an_unknown_extension_is_rejected() {
        assert_eq!(
            check("notes.txt", 10).unwrap_err().to_string(),
            "❌ Invalid file type. Allowed: JPG, JPEG, PNG, WEBP."
        );
    }

    #[test]
    fn a_file_of_exactly_the_max_size_passes() {
        assert!(check("photo.png", 12 * 1024 * 1024).is_ok());
        assert!(check("report.pdf", 5 * 1024 * 1024).is_ok());
    }

    #[test]
    fn one_byte_over_the_max_fails_with_the_size_in_mib() {
        assert_eq!(
            check("photo.png", 12 * 1024 * 1024 + 1).unwrap_err().to_string(),
            "❌ File size exceeds 12 MB. Your file is 12.00 MB."
        );
        assert_eq!(
            check("report.pdf", 5 * 1024 * 1024 + 1).unwrap_err().to_string(),
            "❌ File size exceeds 5 MB. Your file is 5.00 MB."
        );
    }

    #[test]
    fn a_six_mib_pdf_reports_six_point_zero_zero() {
        assert_eq!(
            check("report.pdf", 6 * 1024 * 1024).unwrap_err().to_string(),
            "❌ File size exceeds 5 MB. Your file is 6.00 MB."
        );
    }

    #[test]
    fn validation_is_pure_and_repeatable() {
        let first = check("report.pdf", 6 * 1024 * 1024).unwrap_err();
        let second = check("report.pdf", 6 * 1024 * 1024).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn accept_attribute_lists_every_allowed_extension() {
        assert_eq!(accept(), ".jpg,.jpeg,.png,.webp,.pdf");
    }
}
