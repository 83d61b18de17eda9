// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator-facing messages for scan outcomes and errors.
//
// Every outcome maps to a plain-language summary plus a concrete suggestion,
// so the capture UI can show something actionable instead of a flag name.

use crate::error::ScanwerkError;
use crate::types::DetectionQuality;

/// A human-readable outcome with a plain summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct Guidance {
    /// Plain-language summary (shown as a heading).
    pub message: String,
    /// What the operator should do next (shown as body text).
    pub suggestion: String,
    /// Whether simply re-taking the photo is likely to help.
    pub retriable: bool,
}

/// Guidance for a completed capture, keyed on its detection-quality flag.
pub fn for_quality(quality: DetectionQuality) -> Guidance {
    match quality {
        DetectionQuality::Detected => Guidance {
            message: "Document captured and straightened.".into(),
            suggestion: "The page is ready for archiving.".into(),
            retriable: false,
        },
        DetectionQuality::FallbackUndetected => Guidance {
            message: "No clear document outline was detected.".into(),
            suggestion: "The uncorrected photo was kept. Re-take it against a \
                         contrasting background, or use the manual crop tool."
                .into(),
            retriable: true,
        },
        DetectionQuality::FallbackError => Guidance {
            message: "The photo could not be corrected automatically.".into(),
            suggestion: "The uncorrected photo was kept. Try again, or use the \
                         manual crop tool."
                .into(),
            retriable: true,
        },
    }
}

/// Guidance for a failed capture.
pub fn for_error(err: &ScanwerkError) -> Guidance {
    match err {
        ScanwerkError::NoQuadrilateralFound => for_quality(DetectionQuality::FallbackUndetected),
        ScanwerkError::DegenerateTransform(_) => for_quality(DetectionQuality::FallbackError),

        ScanwerkError::InvalidInput(_) => Guidance {
            message: "This capture is empty or malformed.".into(),
            suggestion: "Nothing was saved. Check the camera feed and take the photo again.".into(),
            retriable: true,
        },

        ScanwerkError::ImageError(_) => Guidance {
            message: "There's a problem with this image file.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try \
                         saving it as a JPEG or PNG first."
                .into(),
            retriable: false,
        },

        ScanwerkError::Io(_) => Guidance {
            message: "The file could not be read or written.".into(),
            suggestion: "Check the path exists and the device has free space, then try again."
                .into(),
            retriable: true,
        },

        ScanwerkError::Serialization(_) => Guidance {
            message: "The configuration could not be understood.".into(),
            suggestion: "Check the configuration file for typos and try again.".into(),
            retriable: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_is_not_retriable() {
        let g = for_quality(DetectionQuality::Detected);
        assert!(!g.retriable);
    }

    #[test]
    fn fallbacks_suggest_manual_crop() {
        for quality in [
            DetectionQuality::FallbackUndetected,
            DetectionQuality::FallbackError,
        ] {
            let g = for_quality(quality);
            assert!(g.retriable);
            assert!(g.suggestion.contains("manual crop"));
        }
    }

    #[test]
    fn recoverable_errors_match_their_quality_guidance() {
        let g = for_error(&ScanwerkError::NoQuadrilateralFound);
        assert_eq!(
            g.message,
            for_quality(DetectionQuality::FallbackUndetected).message
        );
    }

    #[test]
    fn invalid_input_reports_nothing_saved() {
        let g = for_error(&ScanwerkError::InvalidInput("zero-sized image".into()));
        assert!(g.suggestion.contains("Nothing was saved"));
    }
}
