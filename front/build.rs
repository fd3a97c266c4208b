use std::{fs, path::Path};

fn parse_memory_size(size: &str) -> Option<u64> {
    let size = size.trim();
    let Some(split_n) = size.find(' ') else {
        eprintln!("Expected a space in the size str: {size}");
        return None;
    };

    let (num_str, unit) = size.split_at(split_n);

    let Ok(num) = num_str.trim().parse::<u64>() else {
        eprintln!("Invalid number format: {size}, '{num_str}', '{unit}'");
        return None;
    };

    let multiplier: u64 = match unit.trim().to_lowercase().as_str() {
        "kb" => 1_000,
        "kib" => 1_024,
        "mb" => 1_000 * 1_000,
        "mib" => 1_024 * 1_024,
        "gb" => 1_000 * 1_000 * 1_000,
        "gib" => 1_024 * 1_024 * 1_024,
        _ => {
            eprintln!("Unknown unit");
            return None;
        }
    };

    Some(num * multiplier)
}

fn main() {
    let limits_path = Path::new("..").join("Limits.toml");
    println!("cargo:rerun-if-changed={}", limits_path.display());

    let Ok(contents) = fs::read_to_string(&limits_path) else {
        panic!("Could not find Limits.toml config file in {limits_path:?}");
    };

    let value: toml::Value = contents.parse().expect("Unable to parse TOML");

    for (category, env_name) in [
        ("image", "IMAGE_SIZE_LIMIT"),
        ("document", "DOCUMENT_SIZE_LIMIT"),
    ] {
        let bytes = value
            .get("upload")
            .and_then(|upload| upload.get(category))
            .and_then(|limit| limit.as_str())
            .and_then(parse_memory_size)
            .unwrap_or_else(|| panic!("{category} upload size not found in Limits.toml"));

        println!("cargo:rustc-env={env_name}={bytes}");
    }
}
