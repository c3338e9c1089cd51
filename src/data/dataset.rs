use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::span::SpanLabel;

/// One tokenized, padded and labelled example.
/// Sequence format: [CLS] question [SEP] context [SEP] [PAD]...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaFeatures {
    pub id:              String,
    pub input_ids:       Vec<u32>,
    pub attention_mask:  Vec<u32>,
    pub start_positions: usize,
    pub end_positions:   usize,
    pub label:           SpanLabel,

    /// Token count of the question alone, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_lengths: Option<usize>,

    /// Answer text token ids for sequence-to-sequence models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_inputs: Option<Vec<u32>>,
}

impl QaFeatures {
    pub fn new(
        id:             impl Into<String>,
        input_ids:      Vec<u32>,
        attention_mask: Vec<u32>,
        label:          SpanLabel,
    ) -> Self {
        let (start_positions, end_positions) = label.positions();
        Self {
            id: id.into(),
            input_ids,
            attention_mask,
            start_positions,
            end_positions,
            label,
            question_lengths: None,
            decoded_inputs:   None,
        }
    }

}

pub struct FeatureDataset {
    features: Vec<QaFeatures>,
}

impl FeatureDataset {
    pub fn new(features: Vec<QaFeatures>) -> Self { Self { features } }

    pub fn sample_count(&self) -> usize { self.features.len() }

    /// Drop every example whose answer was not found in the window.
    /// Filters on the label itself, so an answer genuinely labelled
    /// (0, 0) is kept.
    pub fn retain_answerable(&mut self) -> usize {
        let before = self.features.len();
        self.features.retain(|f| f.label.is_found());
        before - self.features.len()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Vec<QaFeatures> { self.features }
}

impl Dataset<QaFeatures> for FeatureDataset {
    fn get(&self, index: usize) -> Option<QaFeatures> {
        self.features.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.features.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(id: &str, label: SpanLabel) -> QaFeatures {
        QaFeatures::new(id, vec![101, 7, 102, 8, 9, 102], vec![1; 6], label)
    }

    #[test]
    fn test_positions_follow_label() {
        let f = features("a", SpanLabel::Found { start: 3, end: 4 });
        assert_eq!((f.start_positions, f.end_positions), (3, 4));

        let f = features("b", SpanLabel::OutOfWindow);
        assert_eq!((f.start_positions, f.end_positions), (0, 0));

        let f = features("c", SpanLabel::NotFound);
        assert_eq!((f.start_positions, f.end_positions), (0, 0));
    }

    #[test]
    fn test_retain_answerable() {
        let mut ds = FeatureDataset::new(vec![
            features("a", SpanLabel::Found { start: 3, end: 3 }),
            features("b", SpanLabel::OutOfWindow),
            features("c", SpanLabel::NotFound),
            features("d", SpanLabel::Found { start: 0, end: 0 }),
        ]);
        assert_eq!(ds.retain_answerable(), 2);

        let ids: Vec<String> = ds.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_dataset_trait() {
        let ds = FeatureDataset::new(vec![features("a", SpanLabel::NotFound)]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).map(|f| f.id), Some("a".to_string()));
        assert!(ds.get(1).is_none());
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&features("a", SpanLabel::NotFound)).unwrap();
        assert!(!json.contains("question_lengths"));
        assert!(!json.contains("decoded_inputs"));

        let back: QaFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(back.question_lengths, None);
    }
}
