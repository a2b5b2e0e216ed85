/// What the loop driver should do after a command has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Quit,
}

impl SessionFlow {
    pub fn is_running(self) -> bool {
        self == SessionFlow::Continue
    }
}
