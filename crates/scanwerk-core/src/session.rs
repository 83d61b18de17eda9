// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan-session bookkeeping: which document classes are required, which have
// been captured, and how well each capture went. Pure data; rendering and
// persistence are external collaborator concerns.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::types::{CaptureId, CaptureSource, DetectionQuality, DocumentClass, ScanRecord};

/// Per-class status within a session, derived from the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    /// Nothing captured for this class yet.
    Missing,
    /// Captured and automatically rectified.
    Detected,
    /// Captured, but the pipeline fell back to the uncorrected image.
    Fallback,
    /// Captured via the external manual crop tool.
    ManualCrop,
}

/// One capture session against a required-document checklist.
///
/// A new capture for a class replaces the previous one, the same way
/// re-scanning a checklist entry overwrites its stored image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSession {
    required: Vec<DocumentClass>,
    records: HashMap<DocumentClass, ScanRecord>,
}

impl ScanSession {
    pub fn new(required: impl IntoIterator<Item = DocumentClass>) -> Self {
        Self {
            required: required.into_iter().collect(),
            records: HashMap::new(),
        }
    }

    /// Store a pipeline capture for a class, replacing any previous record.
    pub fn record(&mut self, class: DocumentClass, quality: DetectionQuality) -> &ScanRecord {
        let record = ScanRecord {
            id: CaptureId::new(),
            class: class.clone(),
            source: CaptureSource::Pipeline,
            quality: Some(quality),
            captured_at: Utc::now(),
        };
        Self::store(&mut self.records, class, record)
    }

    /// Store a manual-crop capture for a class, replacing any previous record.
    pub fn record_manual_crop(&mut self, class: DocumentClass) -> &ScanRecord {
        let record = ScanRecord {
            id: CaptureId::new(),
            class: class.clone(),
            source: CaptureSource::ManualCrop,
            quality: None,
            captured_at: Utc::now(),
        };
        Self::store(&mut self.records, class, record)
    }

    fn store(
        records: &mut HashMap<DocumentClass, ScanRecord>,
        class: DocumentClass,
        record: ScanRecord,
    ) -> &ScanRecord {
        match records.entry(class) {
            Entry::Occupied(mut entry) => {
                entry.insert(record);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(record),
        }
    }

    /// Status of one class.
    pub fn status_of(&self, class: &DocumentClass) -> ScanStatus {
        match self.records.get(class) {
            None => ScanStatus::Missing,
            Some(record) => match record.source {
                CaptureSource::ManualCrop => ScanStatus::ManualCrop,
                CaptureSource::Pipeline => match record.quality {
                    Some(DetectionQuality::Detected) => ScanStatus::Detected,
                    _ => ScanStatus::Fallback,
                },
            },
        }
    }

    /// The stored record for a class, if any.
    pub fn record_of(&self, class: &DocumentClass) -> Option<&ScanRecord> {
        self.records.get(class)
    }

    /// Required classes with no capture yet, in checklist order.
    pub fn missing(&self) -> Vec<&DocumentClass> {
        self.required
            .iter()
            .filter(|class| !self.records.contains_key(class))
            .collect()
    }

    /// Required classes whose capture fell back to the uncorrected image,
    /// in checklist order. Candidates for a re-scan or a manual crop.
    pub fn needs_review(&self) -> Vec<&DocumentClass> {
        self.required
            .iter()
            .filter(|class| self.status_of(class) == ScanStatus::Fallback)
            .collect()
    }

    /// Whether every required class has a capture (of any status).
    pub fn is_complete(&self) -> bool {
        self.required
            .iter()
            .all(|class| self.records.contains_key(class))
    }

    /// The required checklist, in order.
    pub fn required(&self) -> &[DocumentClass] {
        &self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ScanSession {
        ScanSession::new([
            DocumentClass::new("employment-contract"),
            DocumentClass::new("id-card-front"),
            DocumentClass::new("id-card-back"),
        ])
    }

    #[test]
    fn new_session_is_all_missing() {
        let s = session();
        assert!(!s.is_complete());
        assert_eq!(s.missing().len(), 3);
        assert_eq!(
            s.status_of(&DocumentClass::new("id-card-front")),
            ScanStatus::Missing
        );
    }

    #[test]
    fn recording_updates_status_and_missing() {
        let mut s = session();
        s.record(
            DocumentClass::new("id-card-front"),
            DetectionQuality::Detected,
        );
        assert_eq!(
            s.status_of(&DocumentClass::new("id-card-front")),
            ScanStatus::Detected
        );
        assert_eq!(s.missing().len(), 2);
    }

    #[test]
    fn fallback_captures_need_review() {
        let mut s = session();
        s.record(
            DocumentClass::new("id-card-back"),
            DetectionQuality::FallbackUndetected,
        );
        let review = s.needs_review();
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].0, "id-card-back");
    }

    #[test]
    fn manual_crop_replaces_fallback() {
        let mut s = session();
        let class = DocumentClass::new("employment-contract");
        s.record(class.clone(), DetectionQuality::FallbackError);
        assert_eq!(s.status_of(&class), ScanStatus::Fallback);

        s.record_manual_crop(class.clone());
        assert_eq!(s.status_of(&class), ScanStatus::ManualCrop);
        assert!(s.needs_review().is_empty());
    }

    #[test]
    fn complete_after_all_classes_captured() {
        let mut s = session();
        for class in s.required().to_vec() {
            s.record(class, DetectionQuality::Detected);
        }
        assert!(s.is_complete());
        assert!(s.missing().is_empty());
    }

    #[test]
    fn unlisted_class_can_still_be_recorded() {
        // Extra captures outside the checklist are kept but do not affect
        // completeness.
        let mut s = session();
        s.record(DocumentClass::new("extra-page"), DetectionQuality::Detected);
        assert!(!s.is_complete());
        assert_eq!(
            s.status_of(&DocumentClass::new("extra-page")),
            ScanStatus::Detected
        );
    }
}
