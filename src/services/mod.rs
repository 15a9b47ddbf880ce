pub mod edit;
pub mod gradient;
pub mod history;
pub mod shared;

pub use edit::{AnchorChange, Editor, SwapOutcome, SwapState, Tool};
pub use gradient::{CancelToken, GradientOptions, GradientReport, DEFAULT_DITHER_INTENSITY};
pub use history::{History, HISTORY_LIMIT};
pub use shared::SharedQuilt;
