//! Resumable, sortable paging over the working dataset
//!
//! A [`BrowseSession`] belongs to one working dataset and is threaded through
//! every browser invocation by the caller. It moves through:
//!
//! 1. **Uninitialized**: cursor 0, no sort chosen
//! 2. **SortChosen**: the first invocation asks the prompt for a sort once;
//!    the ordered view is built and kept for the rest of the session
//! 3. **Paging**: windows of `page_size` rows from the cursor, advancing it
//!    while the prompt asks for more
//! 4. **Stopped**: the prompt declines and the updated session is returned
//!
//! Declining to resume resets the cursor only. The sort chosen on the first
//! invocation stays for the whole session.

use crate::error::Result;
use crate::models::{SortOrder, WorkingDataset};
use polars::prelude::*;
use tracing::debug;

/// Decisions the browser needs from its caller
pub trait BrowsePrompt {
    /// Continue from a non-zero cursor? `false` starts over at row 0
    fn resume_from(&mut self, cursor: usize) -> Result<bool>;

    /// Sort for the session, `None` for filter order
    fn choose_sort(&mut self) -> Result<Option<SortOrder>>;

    /// Present a window starting at `offset`; return whether to keep going
    fn show_window(&mut self, window: &DataFrame, offset: usize) -> Result<bool>;
}

/// Sort configuration of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unchosen,
    /// Fixed for the session; `None` keeps filter order
    Chosen(Option<SortOrder>),
}

/// Paging state owned by the caller between invocations
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    cursor: usize,
    sort: SortState,
    view: Option<DataFrame>,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Fix the session's ordering of `rows`; later calls keep the first choice
    pub fn choose_sort(&mut self, rows: &DataFrame, order: Option<SortOrder>) -> Result<()> {
        if self.sort != SortState::Unchosen {
            return Ok(());
        }
        self.view = match order {
            Some(order) => Some(sorted_rows(rows, order)?),
            None => None,
        };
        self.sort = SortState::Chosen(order);
        Ok(())
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }
}

/// Stable sort with nulls last
pub fn sorted_rows(rows: &DataFrame, order: SortOrder) -> Result<DataFrame> {
    debug!(
        "Sorting {} rows by {} ({:?})",
        rows.height(),
        order.key.column_name(),
        order.direction
    );

    Ok(rows.sort(
        [order.key.column_name()],
        SortMultipleOptions::default()
            .with_order_descending(order.direction.is_descending())
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?)
}

/// Reveals raw rows a page at a time
#[derive(Debug, Clone, Copy)]
pub struct RowBrowser {
    page_size: usize,
}

impl RowBrowser {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run one browsing invocation
    ///
    /// # Arguments
    ///
    /// * `dataset` - The working dataset the session belongs to
    /// * `session` - State returned by the previous invocation, or a new session
    /// * `prompt` - Source of resume, sort and continue decisions
    ///
    /// # Returns
    ///
    /// The session with its cursor advanced past the last window shown
    pub fn browse(
        &self,
        dataset: &WorkingDataset,
        mut session: BrowseSession,
        prompt: &mut impl BrowsePrompt,
    ) -> Result<BrowseSession> {
        if session.cursor > 0 && !prompt.resume_from(session.cursor)? {
            debug!("Restarting raw rows from the top");
            session.reset_cursor();
        }

        if session.sort == SortState::Unchosen {
            let order = prompt.choose_sort()?;
            session.choose_sort(dataset.rows(), order)?;
        }

        loop {
            let offset = session.cursor;
            let window = self.next_window(dataset, &mut session);
            if !prompt.show_window(&window, offset)? {
                break;
            }
        }

        Ok(session)
    }

    /// Window at the cursor, advancing the cursor by one page
    ///
    /// Past the end the window is partial or empty.
    pub fn next_window(&self, dataset: &WorkingDataset, session: &mut BrowseSession) -> DataFrame {
        let rows = session.view.as_ref().unwrap_or(dataset.rows());
        let window = rows.slice(session.cursor as i64, self.page_size);
        session.cursor += self.page_size;
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;
    use crate::models::{SortDirection, SortKey};
    use std::collections::{BTreeSet, VecDeque};

    /// Scripted prompt answers, recording every window offset shown
    #[derive(Default)]
    struct ScriptedPrompt {
        resume: VecDeque<bool>,
        sort: VecDeque<Option<SortOrder>>,
        keep_going: VecDeque<bool>,
        sort_requests: usize,
        shown: Vec<(usize, usize)>,
        first_values: Vec<Option<i64>>,
    }

    impl ScriptedPrompt {
        fn new(keep_going: &[bool]) -> Self {
            Self {
                keep_going: keep_going.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
            self.sort.push_back(sort);
            self
        }

        fn with_resume(mut self, resume: bool) -> Self {
            self.resume.push_back(resume);
            self
        }
    }

    impl BrowsePrompt for ScriptedPrompt {
        fn resume_from(&mut self, _cursor: usize) -> Result<bool> {
            Ok(self.resume.pop_front().unwrap_or(true))
        }

        fn choose_sort(&mut self) -> Result<Option<SortOrder>> {
            self.sort_requests += 1;
            Ok(self.sort.pop_front().flatten())
        }

        fn show_window(&mut self, window: &DataFrame, offset: usize) -> Result<bool> {
            self.shown.push((offset, window.height()));
            let first = if window.height() > 0 {
                window.column("id").unwrap().i64().unwrap().get(0)
            } else {
                None
            };
            self.first_values.push(first);
            Ok(self.keep_going.pop_front().unwrap_or(false))
        }
    }

    fn dataset(rows: usize) -> WorkingDataset {
        let ids: Vec<i64> = (0..rows as i64).collect();
        let durations: Vec<f64> = ids.iter().map(|id| ((id * 7) % 12) as f64).collect();
        let frame = df!(
            "id" => ids,
            columns::TRIP_DURATION => durations
        )
        .unwrap();
        WorkingDataset::new(frame, vec!["Chicago".to_string()], BTreeSet::new())
    }

    #[test]
    fn test_twelve_rows_page_in_fives() {
        let browser = RowBrowser::new(5);
        let working = dataset(12);
        let mut prompt = ScriptedPrompt::new(&[true, true, false]).with_sort(None);

        let session = browser
            .browse(&working, BrowseSession::new(), &mut prompt)
            .unwrap();

        assert_eq!(prompt.shown, vec![(0, 5), (5, 5), (10, 2)]);
        assert_eq!(prompt.first_values, vec![Some(0), Some(5), Some(10)]);
        assert_eq!(session.cursor(), 15);
    }

    #[test]
    fn test_past_end_is_empty_window() {
        let browser = RowBrowser::new(5);
        let working = dataset(12);
        let mut session = BrowseSession::new();

        for _ in 0..3 {
            browser.next_window(&working, &mut session);
        }
        let window = browser.next_window(&working, &mut session);

        assert_eq!(window.height(), 0);
        assert_eq!(session.cursor(), 20);
    }

    #[test]
    fn test_resume_continues_from_cursor() {
        let browser = RowBrowser::new(5);
        let working = dataset(12);

        let mut first = ScriptedPrompt::new(&[false]).with_sort(None);
        let session = browser
            .browse(&working, BrowseSession::new(), &mut first)
            .unwrap();
        assert_eq!(session.cursor(), 5);

        let mut second = ScriptedPrompt::new(&[false]).with_resume(true);
        let session = browser.browse(&working, session, &mut second).unwrap();

        assert_eq!(second.shown, vec![(5, 5)]);
        assert_eq!(second.sort_requests, 0);
        assert_eq!(session.cursor(), 10);
    }

    #[test]
    fn test_decline_resets_cursor_and_keeps_sort() {
        let browser = RowBrowser::new(5);
        let working = dataset(12);
        let order = SortOrder::new(SortKey::TripDuration, SortDirection::Descending);

        let mut first = ScriptedPrompt::new(&[true, false]).with_sort(Some(order));
        let session = browser
            .browse(&working, BrowseSession::new(), &mut first)
            .unwrap();
        assert_eq!(session.cursor(), 10);
        assert_eq!(session.sort(), SortState::Chosen(Some(order)));

        let mut second = ScriptedPrompt::new(&[false]).with_resume(false);
        let session = browser.browse(&working, session, &mut second).unwrap();

        assert_eq!(second.sort_requests, 0);
        assert_eq!(second.shown, vec![(0, 5)]);
        assert_eq!(second.first_values, first.first_values[..1].to_vec());
        assert_eq!(session.cursor(), 5);
        assert_eq!(session.sort(), SortState::Chosen(Some(order)));
    }

    #[test]
    fn test_sort_is_stable_and_descending() {
        let browser = RowBrowser::new(12);
        let working = dataset(12);
        let order = SortOrder::new(SortKey::TripDuration, SortDirection::Descending);
        let mut session = BrowseSession::new();
        session.choose_sort(working.rows(), Some(order)).unwrap();

        let window = browser.next_window(&working, &mut session);
        let durations: Vec<f64> = window
            .column(columns::TRIP_DURATION)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();

        let mut expected = durations.clone();
        expected.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(durations, expected);
        assert_eq!(durations[0], 11.0);
    }

    #[test]
    fn test_sort_leaves_dataset_order() {
        let working = dataset(6);
        let mut session = BrowseSession::new();
        let order = SortOrder::new(SortKey::TripDuration, SortDirection::Ascending);
        session.choose_sort(working.rows(), Some(order)).unwrap();

        let ids: Vec<i64> = working
            .rows()
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_second_sort_choice_is_ignored() {
        let working = dataset(6);
        let mut session = BrowseSession::new();
        session.choose_sort(working.rows(), None).unwrap();

        let order = SortOrder::new(SortKey::TripDuration, SortDirection::Ascending);
        session.choose_sort(working.rows(), Some(order)).unwrap();

        assert_eq!(session.sort(), SortState::Chosen(None));
    }
}
