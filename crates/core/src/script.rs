//! Entry points for loosely typed script callers.
//!
//! Scripts hand over JSON-like values instead of typed arguments. These
//! functions check them in the same order and with the same error kinds as
//! the scripting API always has, and only touch the controller once every
//! check has passed.

use crate::entity::RaycastFlags;
use crate::error::IrisError;
use crate::interaction::{Interaction, InteractionId, SearchType};
use crate::tracker::Iris;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Validate and register an interaction described by script values.
///
/// `payload` must be an object with a string `name`; `order`, when present
/// and not null, must be an integer. All other payload fields are decoded
/// into the attachment type. Model targets may be given as the unsigned hash
/// or as its signed 32-bit reading; both match the same model.
pub fn create_interaction_from_script<A: DeserializeOwned>(
    iris: &mut Iris<A>,
    search_type: &Value,
    target: &Value,
    payload: &Value,
) -> Result<InteractionId, IrisError> {
    let search_type = SearchType::try_from(integer(search_type, "searchType")?)?;
    let target = integer(target, "target")?;
    let interaction = interaction_from_payload(payload)?;

    iris.create_interaction(search_type, target, interaction)
}

/// Decode a script payload into an [`Interaction`].
pub fn interaction_from_payload<A: DeserializeOwned>(
    payload: &Value,
) -> Result<Interaction<A>, IrisError> {
    let fields = match payload {
        Value::Null => {
            return Err(IrisError::InvalidField {
                field: "interaction",
                reason: "cannot be null",
            })
        }
        Value::Object(fields) => fields,
        _ => {
            return Err(IrisError::InvalidField {
                field: "interaction",
                reason: "must be an object",
            })
        }
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) => name.clone(),
        _ => {
            return Err(IrisError::InvalidField {
                field: "name",
                reason: "is not a string",
            })
        }
    };

    let order = match fields.get("order") {
        None | Some(Value::Null) => None,
        Some(value) => Some(integer(value, "order").map_err(|_| IrisError::InvalidField {
            field: "order",
            reason: "is not an integer",
        })?),
    };

    let rest: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "name" && key.as_str() != "order")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let attachment = serde_json::from_value(Value::Object(rest))?;

    Ok(Interaction {
        name,
        order,
        attachment,
    })
}

/// Set the scan distance from a script value.
pub fn set_raycast_distance_from_script<A>(
    iris: &mut Iris<A>,
    value: &Value,
) -> Result<(), IrisError> {
    let distance = value.as_f64().ok_or(IrisError::NotANumber {
        field: "newDistance",
    })?;
    iris.set_raycast_distance(distance as f32)
}

/// Set the scan flags from a script value.
///
/// Fractional or negative numbers are truncated into the `u32` bit space.
pub fn set_raycast_flags_from_script<A>(
    iris: &mut Iris<A>,
    value: &Value,
) -> Result<(), IrisError> {
    let flags = value
        .as_f64()
        .ok_or(IrisError::NotANumber { field: "newFlags" })?;
    iris.set_raycast_flags(RaycastFlags::from_bits_retain(flags as i64 as u32));
    Ok(())
}

fn integer(value: &Value, field: &'static str) -> Result<i64, IrisError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    // Scripts may pass integral floats such as `2.0`.
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 => {
            Ok(n as i64)
        }
        _ => Err(IrisError::NotAnInteger { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Extra {
        event_name: Option<String>,
    }

    fn create(
        iris: &mut Iris<Extra>,
        search_type: Value,
        target: Value,
        payload: Value,
    ) -> Result<InteractionId, IrisError> {
        create_interaction_from_script(iris, &search_type, &target, &payload)
    }

    #[test]
    fn accepts_well_formed_payload() {
        let mut iris = Iris::new();
        let id = create(
            &mut iris,
            json!(2),
            json!(1234),
            json!({ "name": "Adder only", "order": 99, "eventName": "adder_option_clicked" }),
        )
        .unwrap();

        let stored = iris.get_interaction(id).unwrap();
        assert_eq!(stored.name, "Adder only");
        assert_eq!(stored.order, Some(99));
        assert_eq!(
            stored.attachment.event_name.as_deref(),
            Some("adder_option_clicked")
        );
    }

    #[test]
    fn error_kinds_follow_check_order() {
        let mut iris = Iris::new();
        let cases = [
            (json!("1"), json!(1), json!({ "name": "x" })),
            (json!(1.5), json!(1), json!({ "name": "x" })),
            (json!(0), json!(1), json!({ "name": "x" })),
            (json!(4), json!(1), json!({ "name": "x" })),
            (json!(1), json!("1"), json!({ "name": "x" })),
            (json!(1), json!(1), Value::Null),
            (json!(1), json!(1), json!({ "name": 5 })),
            (json!(1), json!(1), json!({ "label": "x" })),
            (json!(1), json!(1), json!({ "name": "x", "order": 1.5 })),
        ];

        let errors: Vec<IrisError> = cases
            .into_iter()
            .map(|(s, t, p)| create(&mut iris, s, t, p).unwrap_err())
            .collect();

        assert!(matches!(errors[0], IrisError::NotAnInteger { field: "searchType" }));
        assert!(matches!(errors[1], IrisError::NotAnInteger { field: "searchType" }));
        assert!(matches!(errors[2], IrisError::OutOfRange { value: 0, .. }));
        assert!(matches!(errors[3], IrisError::OutOfRange { value: 4, .. }));
        assert!(matches!(errors[4], IrisError::NotAnInteger { field: "target" }));
        assert!(matches!(errors[5], IrisError::InvalidField { field: "interaction", .. }));
        assert!(matches!(errors[6], IrisError::InvalidField { field: "name", .. }));
        assert!(matches!(errors[7], IrisError::InvalidField { field: "name", .. }));
        assert!(matches!(errors[8], IrisError::InvalidField { field: "order", .. }));

        assert!(iris.registry().is_empty());
        let id = create(&mut iris, json!(1), json!(2), json!({ "name": "ok" })).unwrap();
        assert_eq!(id, InteractionId(1));
    }

    #[test]
    fn integral_floats_and_null_order_are_accepted() {
        let mut iris = Iris::new();
        let id = create(
            &mut iris,
            json!(3.0),
            json!(55.0),
            json!({ "name": "handle", "order": null }),
        )
        .unwrap();
        let stored = iris.get_interaction(id).unwrap();
        assert_eq!(stored.order, None);
        assert_eq!(stored.attachment, Extra::default());
    }

    #[test]
    fn raycast_setters_require_numbers() {
        let mut iris: Iris<Extra> = Iris::new();
        assert!(matches!(
            set_raycast_distance_from_script(&mut iris, &json!("far")),
            Err(IrisError::NotANumber { .. })
        ));
        assert!(matches!(
            set_raycast_flags_from_script(&mut iris, &json!(null)),
            Err(IrisError::NotANumber { .. })
        ));
        assert_eq!(iris.raycast_distance(), 5.0);
        assert_eq!(iris.raycast_flags(), RaycastFlags::default());

        set_raycast_distance_from_script(&mut iris, &json!(12.5)).unwrap();
        set_raycast_flags_from_script(&mut iris, &json!(2 | 16)).unwrap();
        assert_eq!(iris.raycast_distance(), 12.5);
        assert_eq!(
            iris.raycast_flags(),
            RaycastFlags::VEHICLES | RaycastFlags::OBJECTS
        );
    }
}
