use super::trade::Stat;

// Evolution levels arrive as integers, integral floats, null or not at all
pub fn deserialize_optional_level<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct OptionalLevel;

    impl<'de> Visitor<'de> for OptionalLevel {
        type Value = Option<u32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative level or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(OptionalLevel)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u32::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u32::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
                Ok(Some(value as u32))
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(OptionalLevel)
}

// Stats map -> Vec, keeping the order the server wrote the keys in
pub fn deserialize_ordered_stats<'de, D>(deserializer: D) -> Result<Vec<Stat>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{MapAccess, Visitor};
    use std::fmt;

    struct OrderedStats;

    impl<'de> Visitor<'de> for OrderedStats {
        type Value = Vec<Stat>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of stat names to numbers")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut stats = Vec::with_capacity(map.size_hint().unwrap_or(6));
            while let Some((name, value)) = map.next_entry::<String, f64>()? {
                stats.push(Stat { name, value });
            }
            Ok(stats)
        }
    }

    deserializer.deserialize_map(OrderedStats)
}
