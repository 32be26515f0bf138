use std::collections::BTreeMap;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Field-keyed validation messages, collected before anything is written.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct ValidationError(BTreeMap<String, Vec<String>>);

impl ValidationError {
    pub fn add_error<K: Into<String>, V: Into<String>>(&mut self, key: K, val: V) {
        let entry = self.0.entry(key.into()).or_insert(Vec::default());
        entry.push(val.into());
    }

    pub fn from<K: Into<String>, V: Into<String>>(key: K, val: V) -> Self {
        let mut error = ValidationError::default();
        error.add_error(key, val);
        error
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: ValidationError) {
        for (key, errors) in other.0.into_iter() {
            let entry = self.0.entry(key).or_default();
            entry.extend(errors);
        }
    }

    pub fn empty(&self) -> bool {
        self.len() == 0
    }

    pub fn messages(&self, key: &str) -> &[String] {
        self.0.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Moves every message under `prefix`, e.g. `email` becomes `users[0].email`.
    pub fn nested(self, prefix: &str) -> ValidationError {
        let inner = self
            .0
            .into_iter()
            .map(|(key, errors)| (format!("{}.{}", prefix, key), errors))
            .collect();
        ValidationError(inner)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (key, errors) in &self.0 {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", key, error)?;
                first = false;
            }
        }
        Ok(())
    }
}
