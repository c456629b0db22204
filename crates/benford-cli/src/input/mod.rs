pub mod file;
pub mod stdin;

/// Parse a dataset from text.
///
/// Accepts a JSON array of numbers, or numbers separated by whitespace,
/// commas or semicolons. Lines starting with `#` are comments. Scientific
/// notation (`1.2e-6`) is accepted. Values are read as `f64` so subnormal
/// and very large magnitudes keep their leading digits.
pub fn parse_dataset(text: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut values = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        for token in line.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
            if token.is_empty() {
                continue;
            }
            let parsed: f64 = token
                .parse()
                .map_err(|e| format!("Invalid number '{token}': {e}"))?;
            values.push(parsed);
        }
    }
    Ok(values)
}

/// Load a dataset from `--data <file>` or, failing that, from piped stdin.
pub fn load_dataset(path: Option<&str>) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_dataset(path);
    }
    match stdin::read_stdin_text()? {
        Some(text) => parse_dataset(&text),
        None => Err("--data <file> or piped numbers on stdin required".into()),
    }
}
