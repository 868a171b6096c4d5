// Key Store
// Keypair <-> textual key record with base64 fields

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::bigint::RsaBigInt;
use super::codec::{base64_to_int, int_to_base64};
use super::keygen::Keypair;
use crate::error::{Result, RsaError};

/// Private exponent slot of a key record: a base64 string, or `false`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrivateField {
    Present(String),
    Absent(bool),
}

impl Default for PrivateField {
    fn default() -> Self {
        PrivateField::Absent(false)
    }
}

/// Serialized keypair: `{"n": "<b64>", "e": "<b64>", "d": "<b64>" | false}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(default)]
    pub d: PrivateField,
}

impl KeyRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Export `n` and `e`, and `d` only when `include_private` is set
/// and the keypair has one
pub fn export_key(keypair: &Keypair, include_private: bool) -> KeyRecord {
    let d = match keypair.d() {
        Some(d) if include_private => PrivateField::Present(int_to_base64(d)),
        _ => PrivateField::Absent(false),
    };

    KeyRecord {
        n: Some(int_to_base64(keypair.n())),
        e: Some(int_to_base64(keypair.e())),
        d,
    }
}

/// Build a fresh keypair from `record`; missing fields keep their defaults
pub fn import_key(record: &KeyRecord) -> Result<Keypair> {
    let mut keypair = Keypair::default();
    keypair.import(record)?;
    Ok(keypair)
}

impl Keypair {
    /// Overwrite the fields present in `record`, leaving the rest as they are.
    /// The key length is recomputed from the resulting `n`, which must be non-zero,
    /// and the resulting `e` must satisfy 2 <= e < n. On error `self` is unchanged.
    pub fn import(&mut self, record: &KeyRecord) -> Result<()> {
        let n = record.n.as_deref().map(base64_to_int).transpose()?;
        let e = record.e.as_deref().map(base64_to_int).transpose()?;
        let d = match &record.d {
            PrivateField::Present(text) => Some(base64_to_int(text)?),
            PrivateField::Absent(false) => None,
            PrivateField::Absent(true) => {
                return Err(RsaError::MalformedRecord(
                    "`d` must be a base64 string or false".to_string(),
                ))
            }
        };

        let new_n = n.as_ref().unwrap_or(self.n());
        if new_n.is_zero() {
            return Err(RsaError::MissingModulus);
        }
        let new_e = e.as_ref().unwrap_or(self.e());
        if new_e < &RsaBigInt::from(2u8) || new_e >= new_n {
            return Err(RsaError::MalformedRecord(
                "`e` must be at least 2 and less than `n`".to_string(),
            ));
        }

        if let Some(n) = n {
            self.set_n(n);
        }
        if let Some(e) = e {
            self.set_e(e);
        }
        if let Some(d) = d {
            self.set_d(d);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::generate_keypair;

    fn toy_keypair() -> Keypair {
        Keypair::new(from_u64(3233), from_u64(17), Some(from_u64(413))).unwrap()
    }

    #[test]
    fn test_export_private() {
        let record = export_key(&toy_keypair(), true);
        assert_eq!(record.n.as_deref(), Some("DKE="));
        assert_eq!(record.e.as_deref(), Some("EQ=="));
        assert_eq!(record.d, PrivateField::Present("AZ0=".to_string()));
    }

    #[test]
    fn test_export_public() {
        let record = export_key(&toy_keypair(), false);
        assert_eq!(record.d, PrivateField::Absent(false));

        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(json["d"], serde_json::Value::Bool(false));
        assert_eq!(json["n"], "DKE=");
    }

    #[test]
    fn test_import_roundtrip() {
        let keypair = generate_keypair(512).unwrap();

        let private = import_key(&export_key(&keypair, true)).unwrap();
        assert_eq!(private, keypair);

        let public = import_key(&export_key(&keypair, false)).unwrap();
        assert_eq!(public.n(), keypair.n());
        assert_eq!(public.e(), keypair.e());
        assert_eq!(public.d(), None);
        assert_eq!(public.key_length(), keypair.key_length());
    }

    #[test]
    fn test_partial_import_keeps_prior() {
        let mut keypair = toy_keypair();
        let record = KeyRecord::from_json(r#"{ "e": "Aw==", "d": false }"#).unwrap();

        keypair.import(&record).unwrap();
        assert_eq!(keypair.n(), &from_u64(3233));
        assert_eq!(keypair.e(), &from_u64(3));
        assert_eq!(keypair.d(), Some(&from_u64(413)));
    }

    #[test]
    fn test_import_requires_modulus() {
        let record = KeyRecord::from_json(r#"{ "e": "AQAB" }"#).unwrap();
        assert!(matches!(import_key(&record), Err(RsaError::MissingModulus)));

        let record = KeyRecord::from_json(r#"{ "n": "", "e": "AQAB" }"#).unwrap();
        assert!(matches!(import_key(&record), Err(RsaError::MissingModulus)));
    }

    #[test]
    fn test_import_malformed() {
        let record = KeyRecord::from_json(r#"{ "n": "DKE=", "d": true }"#).unwrap();
        assert!(matches!(import_key(&record), Err(RsaError::MalformedRecord(_))));

        let record = KeyRecord::from_json(r#"{ "n": "@@@" }"#).unwrap();
        assert!(matches!(import_key(&record), Err(RsaError::Base64(_))));

        assert!(matches!(KeyRecord::from_json("[1, 2]"), Err(RsaError::Json(_))));
    }

    #[test]
    fn test_import_degenerate_exponent() {
        for e in ["", "AA==", "AQ==", "DKE=", "DKI="] {
            let text = format!(r#"{{ "n": "DKE=", "e": "{e}" }}"#);
            let record = KeyRecord::from_json(&text).unwrap();
            assert!(
                matches!(import_key(&record), Err(RsaError::MalformedRecord(_))),
                "e = {e:?}"
            );
        }

        // without `e` the default 65537 applies, which is not below this n
        let record = KeyRecord::from_json(r#"{ "n": "DKE=" }"#).unwrap();
        assert!(matches!(import_key(&record), Err(RsaError::MalformedRecord(_))));

        let mut keypair = toy_keypair();
        let record = KeyRecord::from_json(r#"{ "e": "AA==" }"#).unwrap();
        assert!(keypair.import(&record).is_err());
        assert_eq!(keypair, toy_keypair());
    }
}
