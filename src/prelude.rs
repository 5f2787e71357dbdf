//! Commonly used imports.
pub use anyhow::{anyhow, bail, Context, Result};
pub use log::{debug, info, trace, warn};
