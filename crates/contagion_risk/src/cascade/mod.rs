//! Cascade Simulator.
//!
//! Discrete-time default cascade over the exposure network. The failure of
//! one institution writes down its creditors' equity by `amount × LGD`;
//! creditors pushed to zero equity fail in the next round, and so on until
//! a round produces no new failure or the round cap is reached.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Cascade Simulator              │
//! ├──────────────────────────────────────────────┤
//! │  CascadeSimulator - Index + creditor lists   │
//! │  SimulationState  - Per-run equity arena     │
//! │  CascadeResult    - Rounds, loss, depth      │
//! │  Rankings         - One cascade per trigger  │
//! └──────────────────────────────────────────────┘
//! ```

mod error;
mod rankings;
mod result;
mod simulator;
mod state;

pub use error::CascadeError;
pub use rankings::{rank_systemic_importance, SystemicRanking, DEFAULT_RANKING_SIZE};
pub use result::CascadeResult;
pub use simulator::{simulate, CascadeSimulator, MAX_CASCADE_ROUNDS};
