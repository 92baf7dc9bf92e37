//! Integration tests for hash crate

#[cfg(test)]
mod tests {
    use relget_hash::*;
    use tempfile::tempdir;
    use tokio::fs;

    #[tokio::test]
    async fn test_verify_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        let data = b"verify this content";
        fs::write(&file_path, data).await.unwrap();

        let hash = Hash::from_data(data);
        assert!(verify_file(&file_path, &hash.to_hex()).await.unwrap());
        assert!(verify_file(&file_path, &hash.to_hex().to_uppercase())
            .await
            .unwrap());

        let wrong_hash = Hash::from_data(b"different content");
        assert!(!verify_file(&file_path, &wrong_hash.to_hex()).await.unwrap());
    }

    #[test]
    fn test_hash_from_hex_errors() {
        // Too short
        assert!(Hash::from_hex("1234").is_err());

        // Too long
        assert!(Hash::from_hex(&"a".repeat(66)).is_err());

        // Invalid hex
        assert!(Hash::from_hex("xyz123").is_err());
    }

    #[test]
    fn test_hash_from_hex_accepts_uppercase() {
        let hash = Hash::from_data(b"case");
        let parsed = Hash::from_hex(&hash.to_hex().to_uppercase()).unwrap();
        assert_eq!(parsed, hash);
    }
}
