use crate::{
    config::{IncludeMatch, IncludeRule},
    device::{Device, PropertyConfig},
};

/// Returns the first rule that selects `device`.
pub fn device_include<'a>(device: &Device, rules: &'a [IncludeRule]) -> Option<&'a IncludeRule> {
    rules.iter().find(|rule| match rule {
        IncludeRule::Device(key) => *key == device.id || *key == device.name,
        IncludeRule::Match(rule) => matches(rule, device),
    })
}

fn matches(rule: &IncludeMatch, device: &Device) -> bool {
    if rule.id.is_none() && rule.name.is_none() && rule.room.is_none() {
        return false;
    }

    rule.id.as_ref().is_none_or(|id| *id == device.id)
        && rule.name.as_ref().is_none_or(|name| *name == device.name)
        && rule
            .room
            .as_ref()
            .is_none_or(|room| device.room.as_ref() == Some(room))
}

/// Whether a property can be read, has one of `types` and is one of the
/// `allowed` instances.
pub fn instance_include(
    property: &PropertyConfig,
    allowed: &[impl AsRef<str>],
    types: &[&str],
) -> bool {
    property.retrievable
        && types.contains(&property.kind.as_str())
        && allowed
            .iter()
            .any(|instance| instance.as_ref() == property.parameters.instance)
}
