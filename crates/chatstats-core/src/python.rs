//! Python extension module: `chatstats_core`.

use pyo3::prelude::*;

use crate::config::{LinkMode, StatsConfig};
use crate::models::RankedUser;
use crate::stats::ChatStatistics;

fn rows(users: Vec<RankedUser>) -> Vec<(String, Option<String>, u64)> {
    users
        .into_iter()
        .map(|u| (u.id, u.name, u.count))
        .collect()
}

#[pyclass(name = "ChatStatistics", frozen)]
pub struct PyChatStatistics {
    inner: ChatStatistics,
}

#[pymethods]
impl PyChatStatistics {
    #[new]
    #[pyo3(signature = (chat_json, link_mode="offset", workers=1))]
    fn new(chat_json: &str, link_mode: &str, workers: usize) -> PyResult<Self> {
        let config = StatsConfig {
            link_mode: link_mode.parse::<LinkMode>()?,
            workers,
            ..StatsConfig::default()
        };
        let inner = ChatStatistics::from_path(chat_json, config)?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (n=5))]
    fn most_talkative(&self, n: usize) -> Vec<(String, Option<String>, u64)> {
        rows(self.inner.most_talkative(n))
    }

    #[pyo3(signature = (n=5))]
    fn most_replier(&self, n: usize) -> Vec<(String, Option<String>, u64)> {
        rows(self.inner.most_replier(n))
    }

    #[pyo3(signature = (n=5))]
    fn top_report(&self, n: usize) -> String {
        self.inner.top_report(n)
    }

    fn qa_export(&self) -> String {
        self.inner.qa_export()
    }

    fn filtered_export(&self, keywords: Vec<String>) -> String {
        self.inner.filtered_export(&keywords)
    }

    fn questions(&self) -> Vec<(String, Vec<String>)> {
        self.inner
            .qa_index()
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_vec()))
            .collect()
    }

    #[pyo3(signature = (n=100))]
    fn word_frequencies(&self, n: usize) -> Vec<(String, u64)> {
        self.inner.word_frequencies(n)
    }

    fn corpus_text(&self) -> String {
        self.inner.corpus_text()
    }

    fn __repr__(&self) -> String {
        let stats = self.inner.build_stats();
        format!(
            "ChatStatistics(messages={}, users={}, questions={})",
            stats.messages,
            self.inner.ledger().len(),
            self.inner.qa_index().len(),
        )
    }
}

#[pymodule]
fn chatstats_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChatStatistics>()?;
    Ok(())
}
