//! `AccessControlled` wrapper.
//!
//! Version 1 writes `["public", value]`; versions 2 and 3 write
//! `{"access": "Public", "value": value}`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::options::FormatVersion;
use super::raw::{parse_object, parse_string, parse_tuple, to_raw};
use crate::error::{Error, Result, ResultExt};
use crate::ir::{Access, AccessControlled};

#[derive(Serialize, Deserialize)]
struct AccessObject<'a> {
    access: Access,
    #[serde(borrow)]
    value: &'a RawValue,
}

fn v1_access(access: Access) -> &'static str {
    match access {
        Access::Public => "public",
        Access::Private => "private",
    }
}

pub(crate) fn write_access_controlled<T, F>(
    version: FormatVersion,
    ac: &AccessControlled<T>,
    write_value: F,
) -> Result<Box<RawValue>>
where
    F: FnOnce(&T) -> Result<Box<RawValue>>,
{
    let value = write_value(&ac.value).context("encode AccessControlled value")?;
    match version {
        FormatVersion::V1 => to_raw(&[to_raw(v1_access(ac.access))?, value]),
        FormatVersion::V2 | FormatVersion::V3 => to_raw(&AccessObject {
            access: ac.access,
            value: &value,
        }),
    }
}

pub(crate) fn read_access_controlled<'a, T, F>(
    version: FormatVersion,
    raw: &'a RawValue,
    read_value: F,
) -> Result<AccessControlled<T>>
where
    F: FnOnce(&'a RawValue) -> Result<T>,
{
    let (access, value) = match version {
        FormatVersion::V1 => {
            let [access, value] = parse_tuple::<2>(raw, "AccessControlled")?;
            let access = match parse_string(access, "access")?.as_str() {
                "public" => Access::Public,
                "private" => Access::Private,
                other => {
                    return Err(Error::Invalid {
                        what: "access",
                        reason: format!("expected \"public\" or \"private\", got {other:?}"),
                    });
                }
            };
            (access, value)
        }
        FormatVersion::V2 | FormatVersion::V3 => {
            let object: AccessObject = parse_object(raw, "AccessControlled")?;
            (object.access, object.value)
        }
    };
    Ok(AccessControlled::new(
        access,
        read_value(value).context("decode AccessControlled value")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn write_number(version: FormatVersion, ac: &AccessControlled<u32>) -> String {
        write_access_controlled(version, ac, |v| to_raw(v))
            .unwrap()
            .get()
            .to_string()
    }

    #[rstest]
    #[case(FormatVersion::V1, r#"["private",7]"#)]
    #[case(FormatVersion::V2, r#"{"access":"Private","value":7}"#)]
    #[case(FormatVersion::V3, r#"{"access":"Private","value":7}"#)]
    fn test_wire_shape(#[case] version: FormatVersion, #[case] expected: &str) {
        let ac = AccessControlled::private(7u32);
        assert_eq!(write_number(version, &ac), expected);

        let raw = RawValue::from_string(expected.to_string()).unwrap();
        let back = read_access_controlled(version, &raw, |v| {
            Ok(serde_json::from_str::<u32>(v.get())?)
        })
        .unwrap();
        assert_eq!(back, ac);
    }

    #[test]
    fn test_rejects_unknown_access() {
        let raw = RawValue::from_string(r#"["protected",1]"#.to_string()).unwrap();
        let err = read_access_controlled(FormatVersion::V1, &raw, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Invalid { what: "access", .. }));

        let raw = RawValue::from_string(r#"{"access":"public","value":1}"#.to_string()).unwrap();
        assert!(read_access_controlled(FormatVersion::V3, &raw, |_| Ok(())).is_err());
    }
}
