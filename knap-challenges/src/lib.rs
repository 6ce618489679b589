macro_rules! impl_kv_string_serde {
    ($name:ident { $( $field:ident : $ty:ty ),* $(,)? }) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( pub $field : $ty ),*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let pairs: Vec<String> = vec![
                    $( format!("{}={}", stringify!($field), self.$field) ),*
                ];
                write!(f, "{}", pairs.join(","))
            }
        }

        impl std::str::FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> anyhow::Result<Self> {
                let mut kv = std::collections::HashMap::new();
                for pair in s.split(',').filter(|p| !p.trim().is_empty()) {
                    let (k, v) = pair
                        .split_once('=')
                        .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", pair))?;
                    kv.insert(k.trim().to_string(), v.trim().to_string());
                }
                Ok(Self {
                    $(
                        $field: kv
                            .get(stringify!($field))
                            .ok_or_else(|| anyhow::anyhow!("Missing key '{}'", stringify!($field)))?
                            .parse::<$ty>()
                            .map_err(|e| {
                                anyhow::anyhow!("Invalid value for '{}': {}", stringify!($field), e)
                            })?,
                    )*
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

mod error;
pub use error::*;
pub mod knapsack;
