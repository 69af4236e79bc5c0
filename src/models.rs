/// One joke as displayed in the list: its API-assigned id, the joke text,
/// and the user's running vote tally for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub id: String,
    pub text: String,
    pub votes: i32,
}

/// The board owns all mutable list state: the committed jokes (in fetch
/// arrival order) and the loading flag. Display order is derived via
/// `sorted_jokes`, never stored.
pub struct JokeBoard {
    jokes: Vec<Joke>,
    is_loading: bool,
}

impl JokeBoard {
    pub fn new() -> Self {
        Self {
            jokes: Vec::new(),
            // Starts loading: the first collection cycle begins on launch
            is_loading: true,
        }
    }

    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Marks the start of a new collection cycle. The old jokes stay in
    /// place until the cycle commits; the UI switches to its spinner.
    pub fn begin_refresh(&mut self) {
        self.is_loading = true;
    }

    /// Commits a finished collection cycle: the whole list is swapped out,
    /// never merged with the old one.
    pub fn commit(&mut self, jokes: Vec<Joke>) {
        self.jokes = jokes;
        self.is_loading = false;
    }

    /// Failure path for a collection cycle: prior jokes are kept untouched
    /// and the spinner is cleared so the user can retry.
    pub fn abort_refresh(&mut self) {
        self.is_loading = false;
    }

    /// Adjusts the vote tally of the joke with the given id by `delta`.
    /// Builds a fresh list rather than mutating in place, so any snapshot of
    /// the previous list (e.g. one mid-render) still reads its old values.
    /// Unknown ids are a no-op.
    pub fn vote(&mut self, id: &str, delta: i32) {
        self.jokes = self
            .jokes
            .iter()
            .map(|joke| {
                if joke.id == id {
                    Joke {
                        votes: joke.votes + delta,
                        ..joke.clone()
                    }
                } else {
                    joke.clone()
                }
            })
            .collect();
    }

    /// The display projection: jokes sorted by votes, highest first. The
    /// sort is stable, so equal tallies keep their fetch arrival order.
    pub fn sorted_jokes(&self) -> Vec<Joke> {
        let mut sorted = self.jokes.clone();
        sorted.sort_by(|a, b| b.votes.cmp(&a.votes));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joke(id: &str, votes: i32) -> Joke {
        Joke {
            id: id.to_string(),
            text: format!("joke {}", id),
            votes,
        }
    }

    fn board_with(jokes: Vec<Joke>) -> JokeBoard {
        let mut board = JokeBoard::new();
        board.commit(jokes);
        board
    }

    #[test]
    fn new_board_is_empty_and_loading() {
        let board = JokeBoard::new();
        assert!(board.jokes().is_empty());
        assert!(board.is_loading());
    }

    #[test]
    fn commit_replaces_the_whole_list_and_clears_loading() {
        let mut board = board_with(vec![joke("old1", 3), joke("old2", -1)]);
        board.begin_refresh();
        assert!(board.is_loading());

        board.commit(vec![joke("new1", 0)]);
        assert!(!board.is_loading());
        assert_eq!(board.jokes(), &[joke("new1", 0)]);
    }

    #[test]
    fn abort_refresh_keeps_prior_jokes() {
        let mut board = board_with(vec![joke("a", 2)]);
        board.begin_refresh();
        board.abort_refresh();
        assert!(!board.is_loading());
        assert_eq!(board.jokes(), &[joke("a", 2)]);
    }

    #[test]
    fn vote_changes_exactly_one_record_by_exactly_delta() {
        let mut board = board_with(vec![joke("a", 0), joke("b", 0), joke("c", 5)]);
        board.vote("b", 3);

        assert_eq!(board.jokes().len(), 3);
        assert_eq!(board.jokes()[0], joke("a", 0));
        assert_eq!(board.jokes()[1], joke("b", 3));
        assert_eq!(board.jokes()[2], joke("c", 5));
    }

    #[test]
    fn vote_accepts_negative_deltas() {
        let mut board = board_with(vec![joke("a", 0)]);
        board.vote("a", -1);
        board.vote("a", -1);
        assert_eq!(board.jokes()[0].votes, -2);
    }

    #[test]
    fn vote_on_unknown_id_leaves_the_list_unchanged() {
        let mut board = board_with(vec![joke("a", 1), joke("b", 2)]);
        let before = board.jokes().to_vec();
        board.vote("nope", 1);
        assert_eq!(board.jokes(), before.as_slice());
    }

    #[test]
    fn vote_does_not_mutate_a_prior_snapshot() {
        let mut board = board_with(vec![joke("a", 0), joke("b", 0)]);
        let snapshot = board.jokes().to_vec();

        board.vote("a", 7);

        assert_eq!(snapshot, vec![joke("a", 0), joke("b", 0)]);
        assert_eq!(board.jokes()[0].votes, 7);
    }

    #[test]
    fn sorted_jokes_is_descending_and_stable_on_ties() {
        let board = board_with(vec![
            joke("first", 1),
            joke("second", 3),
            joke("third", 1),
            joke("fourth", 2),
        ]);

        let sorted = board.sorted_jokes();
        let ids: Vec<&str> = sorted.iter().map(|j| j.id.as_str()).collect();
        // "first" and "third" tie on 1 vote and must keep arrival order
        assert_eq!(ids, vec!["second", "fourth", "first", "third"]);
    }

    #[test]
    fn sorted_jokes_does_not_reorder_the_stored_list() {
        let board = board_with(vec![joke("a", 0), joke("b", 9)]);
        let _ = board.sorted_jokes();
        assert_eq!(board.jokes()[0].id, "a");
        assert_eq!(board.jokes()[1].id, "b");
    }

    #[test]
    fn sorted_jokes_is_idempotent_without_intervening_mutation() {
        let board = board_with(vec![joke("a", 2), joke("b", 2), joke("c", -1)]);
        assert_eq!(board.sorted_jokes(), board.sorted_jokes());
    }

    #[test]
    fn vote_then_sort_scenario() {
        let mut board = board_with(vec![joke("a", 0), joke("b", 0)]);
        board.vote("b", 1);
        board.vote("a", 1);
        board.vote("b", 1);

        assert_eq!(board.jokes()[0].votes, 1); // a
        assert_eq!(board.jokes()[1].votes, 2); // b

        let sorted = board.sorted_jokes();
        assert_eq!(sorted[0].id, "b");
        assert_eq!(sorted[1].id, "a");
    }
}
