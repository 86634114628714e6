//! The fixed set of quantities the bridge republishes.

/// Token counters, keyed by the `token_type` attribute of token reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Input,
    Output,
    CacheRead,
    CacheCreation,
}

impl TokenType {
    /// Rendering order.
    pub const ALL: [TokenType; 4] = [
        TokenType::Input,
        TokenType::Output,
        TokenType::CacheRead,
        TokenType::CacheCreation,
    ];

    /// Exact (case-sensitive) match on the attribute value.
    pub fn from_attr(v: &str) -> Option<Self> {
        match v {
            "input" => Some(TokenType::Input),
            "output" => Some(TokenType::Output),
            "cache_read" => Some(TokenType::CacheRead),
            "cache_creation" => Some(TokenType::CacheCreation),
            _ => None,
        }
    }

    /// Attribute value and `type` label value.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Input => "input",
            TokenType::Output => "output",
            TokenType::CacheRead => "cache_read",
            TokenType::CacheCreation => "cache_creation",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            TokenType::Input => 0,
            TokenType::Output => 1,
            TokenType::CacheRead => 2,
            TokenType::CacheCreation => 3,
        }
    }
}

/// Semantic kind of a tracked quantity in the exposition output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    /// Absolute running totals as reported upstream.
    Counter,
    Gauge,
}

impl QuantityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuantityKind::Counter => "counter",
            QuantityKind::Gauge => "gauge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedQuantity {
    Tokens(TokenType),
    CostUsd,
}

impl TrackedQuantity {
    pub fn kind(self) -> QuantityKind {
        match self {
            TrackedQuantity::Tokens(_) => QuantityKind::Counter,
            TrackedQuantity::CostUsd => QuantityKind::Gauge,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackedQuantity::Tokens(TokenType::Input) => "input_tokens",
            TrackedQuantity::Tokens(TokenType::Output) => "output_tokens",
            TrackedQuantity::Tokens(TokenType::CacheRead) => "cache_read_tokens",
            TrackedQuantity::Tokens(TokenType::CacheCreation) => "cache_creation_tokens",
            TrackedQuantity::CostUsd => "cost_usd",
        }
    }
}

/// A single overwrite planned by the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    Tokens(TokenType, i64),
    Cost(f64),
}

impl Update {
    pub fn quantity(&self) -> TrackedQuantity {
        match self {
            Update::Tokens(t, _) => TrackedQuantity::Tokens(*t),
            Update::Cost(_) => TrackedQuantity::CostUsd,
        }
    }
}
