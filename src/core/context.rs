//! Explicit operator context handed to every operation that needs identity.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    operator: String,
}

impl SessionContext {
    pub fn new(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        let operator = if operator.trim().is_empty() {
            "unknown".to_string()
        } else {
            operator.trim().to_string()
        };
        Self { operator }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_operator_becomes_unknown() {
        assert_eq!(SessionContext::new("   ").operator(), "unknown");
        assert_eq!(SessionContext::new(" ana ").operator(), "ana");
    }
}
