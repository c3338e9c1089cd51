// ============================================================
// Layer 3: Raw Corpus Records
// ============================================================
// Serde mirrors of the on-disk corpus formats.
//
// TriviaQA (reading comprehension config), one JSON object per line:
//   {
//     "question_id": "tc_33",
//     "question":    "Which city ...?",
//     "answer":         { "aliases": ["Paris", ...], "value": "Paris" },
//     "search_results": { "search_context": ["passage", ...] },
//     "entity_pages":   { "wiki_context":   ["passage", ...] }
//   }
//
// SQuAD (v1.1 and v2.0), one nested JSON document per split:
//   data[] → paragraphs[] → qas[] → answers[]
//
// Every optional part of a record defaults to empty so one
// sparse record never aborts a whole load.

use serde::Deserialize;

/// One TriviaQA question with its evidence passages.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQaRecord {
    pub question_id: String,
    pub question:    String,

    #[serde(default)]
    pub answer: TriviaQaAnswer,

    #[serde(default)]
    pub search_results: SearchResults,

    #[serde(default)]
    pub entity_pages: EntityPages,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriviaQaAnswer {
    /// Every accepted surface form of the answer; the canonical
    /// "value" is always one of them
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Web search snippets; the primary context source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub search_context: Vec<String>,
}

/// Wikipedia pages; used when the search results are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityPages {
    #[serde(default)]
    pub wiki_context: Vec<String>,
}

/// Root of a SQuAD JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct SquadFile {
    pub data: Vec<SquadArticle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadArticle {
    #[serde(default)]
    pub title: String,
    pub paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadParagraph {
    pub context: String,
    pub qas: Vec<SquadQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadQuestion {
    pub id:       String,
    pub question: String,

    #[serde(default)]
    pub answers: Vec<SquadAnswer>,

    /// Only present in SQuAD v2.0
    #[serde(default)]
    pub is_impossible: bool,
}

/// A gold answer; `answer_start` is a character offset.
#[derive(Debug, Clone, Deserialize)]
pub struct SquadAnswer {
    pub text:         String,
    pub answer_start: usize,
}
