//! Error types.
//!
//! Rejections describe why an action had no effect; the state is untouched
//! whenever one is returned. `SaveError` covers persisted state that could
//! not be restored. Nothing here is fatal: the worst case is "start a new run".

use thiserror::Error;

/// Result type alias using [`SaveError`].
pub type Result<T> = std::result::Result<T, SaveError>;

/// Why a battle input was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BattleRejection {
    #[error("not the player's turn")]
    NotPlayerTurn,

    #[error("a turn is currently resolving")]
    Resolving,

    #[error("battle is already over")]
    BattleOver,

    #[error("no card at hand index {0}")]
    InvalidHandIndex(usize),

    #[error("not enough energy: need {required}, have {available}")]
    NotEnoughEnergy { required: i32, available: i32 },

    #[error("no enemy at index {0}")]
    InvalidEnemy(usize),
}

/// Why a shop action was ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShopRejection {
    #[error("current node is not an active shop visit")]
    NotInShop,

    #[error("no offer slot {0}")]
    InvalidSlot(usize),

    #[error("slot {0} is already sold")]
    SlotSold(usize),

    #[error("offer in slot {0} could not be resolved")]
    Unresolved(usize),

    #[error("not enough gold: need {required}, have {available}")]
    NotEnoughGold { required: u32, available: u32 },

    #[error("every slot is sold")]
    NothingToReroll,

    #[error("card removal already used this visit")]
    RemoveUsed,

    #[error("deck has no card '{0}'")]
    CardNotInDeck(String),
}

/// Why a run-level action was ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunRejection {
    #[error("no active run")]
    NoActiveRun,

    #[error("run has already ended")]
    RunEnded,

    #[error("node {0} is outside the map")]
    InvalidNode(usize),

    #[error("node {index} is not the current node {current}")]
    NotCurrentNode { index: usize, current: usize },

    #[error("action needs a {expected} node")]
    WrongNodeType { expected: &'static str },

    #[error("a battle is in progress")]
    BattleInProgress,

    #[error("a turn is resolving")]
    TurnResolving,

    #[error("no battle in progress")]
    NoBattle,

    #[error("a reward is waiting to be claimed")]
    RewardPending,

    #[error("no reward to claim")]
    NoPendingReward,

    #[error("no reward option {0}")]
    InvalidChoice(usize),

    #[error("skipping rewards is disabled")]
    SkipNotAllowed,

    #[error("restart needs a known oath and balance")]
    MissingContent,

    #[error(transparent)]
    Battle(#[from] BattleRejection),

    #[error(transparent)]
    Shop(#[from] ShopRejection),
}

/// Persisted run state could not be written or restored.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved run")]
    NoSave,

    #[error("failed to parse save data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),

    #[error("oath '{0}' is not registered and no fallback was given")]
    MissingOath(String),

    #[error("balance '{0}' is not registered and no fallback was given")]
    MissingBalance(String),

    #[error("no active run to save")]
    NoActiveRun,
}
