use {gloo::console::log, wasm_bindgen::JsCast as _, web_sys::HtmlDocument};

pub const MIB: f64 = 1024.0 * 1024.0;

/// Value of a cookie, uri-decoded, or None when the cookie isn't set.
pub fn cookie(name: &str) -> Option<String> {
    let document: HtmlDocument = gloo::utils::document().unchecked_into();

    let Ok(cookies) = document.cookie() else {
        log!("Could not read the document cookies");
        return None;
    };

    let value = cookie_value(&cookies, name)?;

    // A value that doesn't decode is passed through as-is
    match js_sys::decode_uri_component(&value) {
        Ok(decoded) => Some(String::from(decoded)),
        Err(_) => Some(value),
    }
}

/// Pure part of the lookup: `; `-delimited name=value pairs, first match
/// wins.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(str::to_string)
}

/// Replace the current history entry with itself. Keeps a refresh or a
/// back-navigation from resubmitting the form.
pub fn replace_history_entry() {
    let window = gloo::utils::window();

    let Ok(history) = window.history() else {
        log!("Could not access the session history");
        return;
    };

    let Ok(href) = window.location().href() else {
        log!("Could not read the current location");
        return;
    };

    if history
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&href))
        .is_err()
    {
        log!("Could not replace the current history entry");
    }
}

#[cfg(test)]
mod tests {
    use super::cookie_value;

    #[test]
    fn finds_a_cookie_among_others() {
        let cookies = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("abc123"));
    }

    #[test]
    fn the_name_must_match_exactly() {
        assert_eq!(cookie_value("xcsrftoken=nope", "csrftoken"), None);
        assert_eq!(cookie_value("csrftokenx=nope", "csrftoken"), None);
    }

    #[test]
    fn missing_or_empty_cookie_strings_yield_none() {
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(cookie_value("theme=dark", "csrftoken"), None);
    }

    #[test]
    fn the_first_match_wins() {
        let cookies = "csrftoken=first; csrftoken=second";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("first"));
    }

    #[test]
    fn an_empty_value_is_still_a_value() {
        assert_eq!(cookie_value("csrftoken=", "csrftoken").as_deref(), Some(""));
    }
}
