use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::scorelog::ScoreEvent;

/// The best score a student reached for one lab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestScoreRecord {
    pub lab: u32,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct BestEntry {
    score: f64,
    date: NaiveDate,
}

impl BestEntry {
    /// Keep the higher score. An equal score does not replace the stored
    /// one, so the first occurrence wins a tie.
    fn update(&mut self, event: &ScoreEvent) {
        if event.score > self.score {
            self.score = event.score;
            self.date = event.date;
        }
    }
}

/// Per-lab maximum over a sequence of score events.
#[derive(Debug, Clone, Default)]
pub struct BestScores {
    db: BTreeMap<u32, BestEntry>,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoreEvent>,
    {
        let mut best = Self::new();
        for event in events {
            best.update(event);
        }
        best
    }

    pub fn update(&mut self, event: &ScoreEvent) {
        self.db
            .entry(event.lab)
            .and_modify(|existing| existing.update(event))
            .or_insert(BestEntry {
                score: event.score,
                date: event.date,
            });
    }

    pub fn get(&self, lab: u32) -> Option<f64> {
        self.db.get(&lab).map(|e| e.score)
    }

    /// Date of the submission that set the best score for `lab`.
    pub fn achieved_on(&self, lab: u32) -> Option<NaiveDate> {
        self.db.get(&lab).map(|e| e.date)
    }

    /// One record per lab, ascending by lab number.
    pub fn records(&self) -> Vec<BestScoreRecord> {
        self.db
            .iter()
            .map(|(&lab, e)| BestScoreRecord {
                lab,
                score: e.score,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}
