//! Emitter options.

use g2j_common::limits::MAX_LOWERING_DEPTH;
use serde::{Deserialize, Serialize};

/// How temporaries introduced by hoisting are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VarNaming {
    /// `Point` gives `point`, `java.util.LinkedHashMap<..>` gives `linkedHashMap`.
    #[default]
    TypeName,
    /// `Point` gives `p`.
    Initial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterOptions {
    pub var_naming: VarNaming,
    /// Write `new T<>(n)` instead of repeating type arguments in hoisted
    /// collection declarations.
    pub diamond: bool,
    pub max_depth: u32,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        EmitterOptions {
            var_naming: VarNaming::TypeName,
            diamond: false,
            max_depth: MAX_LOWERING_DEPTH,
        }
    }
}
