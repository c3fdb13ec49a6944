/// Error codes with category prefix
///
/// Categories:
/// - IO: File system operations
/// - CFG: Configuration parsing/validation
/// - IMP: Texture importer (.meta) errors
/// - VAL: Input validation errors
/// - BAT: Batch run errors
/// - INT: Unexpected internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // I/O errors (IO001-IO099)
    /// File not found
    Io001,
    /// Permission denied
    Io002,
    /// Other I/O failure
    Io003,

    // Config errors (CFG001-CFG099)
    /// Invalid config format
    Cfg001,
    /// Invalid optimization policy value
    Cfg002,

    // Importer errors (IMP001-IMP099)
    /// No TextureImporter settings
    Imp001,
    /// Malformed meta file
    Imp002,
    /// Asset not found
    Imp003,

    // Validation errors (VAL001-VAL099)
    /// Invalid argument
    Val001,

    // Batch errors (BAT001-BAT099)
    /// Some assets failed
    Bat001,

    // Internal errors (INT001-INT099)
    /// Unexpected internal error
    Int001,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "IMP001")
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Io001 => "IO001",
            ErrorCode::Io002 => "IO002",
            ErrorCode::Io003 => "IO003",
            ErrorCode::Cfg001 => "CFG001",
            ErrorCode::Cfg002 => "CFG002",
            ErrorCode::Imp001 => "IMP001",
            ErrorCode::Imp002 => "IMP002",
            ErrorCode::Imp003 => "IMP003",
            ErrorCode::Val001 => "VAL001",
            ErrorCode::Bat001 => "BAT001",
            ErrorCode::Int001 => "INT001",
        }
    }

    /// Returns the general cause description
    pub fn cause(&self) -> &'static str {
        match self {
            ErrorCode::Io001 => "The specified file or directory was not found",
            ErrorCode::Io002 => "Permission denied when accessing the file or directory",
            ErrorCode::Io003 => "A file system operation failed",
            ErrorCode::Cfg001 => "The texopt.toml file has an invalid format",
            ErrorCode::Cfg002 => "An optimization setting is out of range",
            ErrorCode::Imp001 => "The asset has no TextureImporter section in its .meta file",
            ErrorCode::Imp002 => "The .meta file could not be parsed",
            ErrorCode::Imp003 => "The specified texture asset does not exist",
            ErrorCode::Val001 => "An invalid argument was provided",
            ErrorCode::Bat001 => "One or more textures could not be updated",
            ErrorCode::Int001 => "An unexpected internal error occurred",
        }
    }

    /// Returns remediation steps
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorCode::Io001 => "1. Verify the project path is correct\n2. Run from the Unity project root or pass --project",
            ErrorCode::Io002 => "1. Check file permissions\n2. Make sure the Unity editor is not locking the file",
            ErrorCode::Io003 => "1. Check available disk space\n2. Try the operation again",
            ErrorCode::Cfg001 => "1. Check the texopt.toml syntax\n2. Remove unknown keys",
            ErrorCode::Cfg002 => "1. Use a max resolution of 32..8192 (power of two)\n2. Use a quality between 0 and 100",
            ErrorCode::Imp001 => "1. Open the project in Unity so the .meta file is generated\n2. Make sure the asset is imported as a texture",
            ErrorCode::Imp002 => "1. Restore the .meta file from version control\n2. Let Unity regenerate it",
            ErrorCode::Imp003 => "1. Check the asset path\n2. Paths are relative to the project root",
            ErrorCode::Val001 => "1. Check the argument format\n2. Use 'texopt --help' for usage information",
            ErrorCode::Bat001 => "1. Re-run with --verbose to see each failure\n2. Fix the listed .meta files and run again",
            ErrorCode::Int001 => "1. Try the operation again\n2. Report the issue with debug logs",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 11] = [
        ErrorCode::Io001,
        ErrorCode::Io002,
        ErrorCode::Io003,
        ErrorCode::Cfg001,
        ErrorCode::Cfg002,
        ErrorCode::Imp001,
        ErrorCode::Imp002,
        ErrorCode::Imp003,
        ErrorCode::Val001,
        ErrorCode::Bat001,
        ErrorCode::Int001,
    ];

    #[test]
    fn all_error_codes_have_valid_string() {
        for code in ALL {
            let s = code.as_str();
            assert!(s.len() >= 5, "{s} too short");
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn all_error_codes_have_cause_and_remediation() {
        for code in ALL {
            assert!(!code.cause().is_empty());
            assert!(code.remediation().starts_with("1. "));
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ErrorCode::Imp001.to_string(), "IMP001");
    }
}
