use std::collections::HashMap;

use crate::auth::password;
use crate::errors::AppError;

/// Municipal office codes and their password hashes.
pub struct MunicipalCredentials {
    hashes: HashMap<String, String>,
}

impl MunicipalCredentials {
    /// Hash each `(code, password)` pair.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, AppError> {
        let mut hashes = HashMap::with_capacity(pairs.len());
        for (code, pass) in pairs {
            let hash = password::hash_password(pass).map_err(AppError::Hash)?;
            hashes.insert(code.to_string(), hash);
        }
        Ok(Self { hashes })
    }

    /// Demo offices MO8881..=MO8890 with passwords PS8881..=PS8890.
    pub fn demo() -> Result<Self, AppError> {
        let owned: Vec<(String, String)> = (8881..=8890)
            .map(|n| (format!("MO{n}"), format!("PS{n}")))
            .collect();
        let pairs: Vec<(&str, &str)> =
            owned.iter().map(|(c, p)| (c.as_str(), p.as_str())).collect();
        Self::from_pairs(&pairs)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// True only for a known code with the matching password.
    pub fn verify(&self, code: &str, pass: &str) -> bool {
        let Some(hash) = self.hashes.get(code.trim()) else {
            return false;
        };
        match password::verify_password(pass, hash) {
            Ok(ok) => ok,
            Err(e) => {
                log::error!("Stored hash for {code} is unreadable: {e}");
                false
            }
        }
    }
}
