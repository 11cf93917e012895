//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use kmarkov::KmarkovError;
    use kmarkov::io::error::{compression_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = KmarkovError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/test.png"));
        assert!(error.to_string().contains("read"));
    }

    // Tests InvalidParameter helper keeps every field in the message
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("population_size", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("population_size"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
        assert!(error.source().is_none());
    }

    // Tests compression errors name the failing stage
    // Verified by dropping the stage from the message
    #[test]
    fn test_compression_error() {
        let error = compression_error("inverse bwt", &"primary index 9 out of range");

        let message = error.to_string();
        assert!(message.contains("inverse bwt"));
        assert!(message.contains("primary index 9"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = KmarkovError::ImageExport {
            path: PathBuf::from("/restricted/output.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/output.png"));
        assert!(error.source().is_some());
        assert!(
            message.contains("access denied"),
            "Error message should include source error details: {message}"
        );
    }

    // Tests configuration errors carry the file and parser message
    // Verified by printing only the path
    #[test]
    fn test_configuration_error() {
        let error = KmarkovError::Configuration {
            path: PathBuf::from("search.toml"),
            reason: "unknown field `populaton`".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("search.toml"));
        assert!(message.contains("populaton"));
    }
}
