use run_state::RunState;

/// Set as soon as the main invocation starts, so that the next invocation cleans up.
pub const IS_POST_KEY: &str = "isPost";

/// The destination of the downloaded file, recorded once the download is accepted.
pub const PATH_KEY: &str = "path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Download the file
    Main,
    /// Remove the downloaded file
    Post,
}

impl Phase {
    pub fn detect<S: RunState + ?Sized>(state: &S) -> Self {
        if should_run_cleanup(state) {
            Phase::Post
        } else {
            Phase::Main
        }
    }
}

pub fn should_run_cleanup<S: RunState + ?Sized>(state: &S) -> bool {
    state
        .get(IS_POST_KEY)
        .is_some_and(|is_post| !is_post.is_empty())
}
