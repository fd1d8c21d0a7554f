#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    Register,
    /// Edit the profile of the local identity at this index.
    EditProfile(usize),
    Deposit,
}
