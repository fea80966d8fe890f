use std::{ops::Index, slice};

/// An error type which can represent multiple errors.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Errors<T> {
    errors: Vec<T>,
}

impl<T> Default for Errors<T> {
    fn default() -> Self {
        Errors::new()
    }
}

impl<T> Errors<T> {
    pub fn new() -> Errors<T> {
        Errors { errors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, t: T) {
        self.errors.push(t);
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.errors.iter()
    }
}

impl<T> Index<usize> for Errors<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.errors[index]
    }
}

#[cfg(test)]
mod tests {
    use super::Errors;

    #[test]
    fn collects_in_order() {
        let mut errors = Errors::new();
        assert!(errors.is_empty());

        errors.push("first");
        errors.push("second");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1], "second");
        assert_eq!(errors.iter().copied().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[test]
    fn as_variant_extracts_payload() {
        let value: Result<u8, &str> = Ok(3);
        assert_eq!(crate::as_variant!(value, Ok), Some(3));

        let value: Result<u8, &str> = Err("no");
        assert_eq!(crate::as_variant!(value, Ok), None);
    }
}
