use std::path::Path;

use anyhow::Context;
use marquee_model::Title;

/// Read a JSON array of titles.
pub fn load_seed_file(path: &Path) -> anyhow::Result<Vec<Title>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_titles_in_wire_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "_id": "0191d8a4-7e1b-7c2a-9f00-1a2b3c4d5e6f",
                "title": "Kaithi",
                "original_title": "கைதி",
                "title_type": "movie",
                "languages": ["ta"],
                "genres": ["Action"],
                "countries": ["IN"],
                "ratting": 8.5,
                "age_rating": 16,
                "year": 2019,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }}]"#
        )
        .unwrap();

        let titles = load_seed_file(file.path()).unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].title, "Kaithi");
        assert!(titles[0].metadata.is_null());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_seed_file(Path::new("/no/such/seed.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/seed.json"));
    }
}
