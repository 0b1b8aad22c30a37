//! Property reflection for inspector UIs
//!
//! An entity describes its editable state as named groups of typed
//! properties. Each property holds a getter over the live entity and,
//! when editable, a setter that goes through the entity's typed setter,
//! so reading is never stale and writing never bypasses a setter's
//! clamping or defaulting.
//!
//! Groups keep insertion order, and so do the properties within a group.

use crate::entities::Entity;
use crate::error::{EntityError, Result};
use crate::types::{Color, LineTypeRef, LineWeight, Transparency};
use std::fmt;

/// Value kind of a property, used by UIs to pick an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Float,
    String,
    Int,
    Enum,
    Boolean,
    Color,
    Linetype,
    Lineweight,
    Transparency,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Float => "float",
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Enum => "enum",
            PropertyType::Boolean => "boolean",
            PropertyType::Color => "color",
            PropertyType::Linetype => "linetype",
            PropertyType::Lineweight => "lineweight",
            PropertyType::Transparency => "transparency",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dynamically typed property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    String(String),
    Int(i64),
    /// One of the property's option names
    Enum(String),
    Boolean(bool),
    Color(Color),
    Linetype(LineTypeRef),
    Lineweight(LineWeight),
    Transparency(Transparency),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Enum(_) => PropertyType::Enum,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Color(_) => PropertyType::Color,
            PropertyValue::Linetype(_) => PropertyType::Linetype,
            PropertyValue::Lineweight(_) => PropertyType::Lineweight,
            PropertyValue::Transparency(_) => PropertyType::Transparency,
        }
    }

    fn mismatch(name: &str, expected: &'static str) -> EntityError {
        EntityError::PropertyTypeMismatch {
            name: name.to_string(),
            expected,
        }
    }

    /// Numeric value; integers are widened
    pub fn into_float(self, name: &str) -> Result<f64> {
        match self {
            PropertyValue::Float(v) => Ok(v),
            PropertyValue::Int(v) => Ok(v as f64),
            _ => Err(Self::mismatch(name, "float")),
        }
    }

    pub fn into_int(self, name: &str) -> Result<i64> {
        match self {
            PropertyValue::Int(v) => Ok(v),
            _ => Err(Self::mismatch(name, "int")),
        }
    }

    pub fn into_string(self, name: &str) -> Result<String> {
        match self {
            PropertyValue::String(v) => Ok(v),
            _ => Err(Self::mismatch(name, "string")),
        }
    }

    pub fn into_enum(self, name: &str) -> Result<String> {
        match self {
            PropertyValue::Enum(v) | PropertyValue::String(v) => Ok(v),
            _ => Err(Self::mismatch(name, "enum")),
        }
    }

    pub fn into_bool(self, name: &str) -> Result<bool> {
        match self {
            PropertyValue::Boolean(v) => Ok(v),
            _ => Err(Self::mismatch(name, "boolean")),
        }
    }

    pub fn into_color(self, name: &str) -> Result<Color> {
        match self {
            PropertyValue::Color(v) => Ok(v),
            _ => Err(Self::mismatch(name, "color")),
        }
    }

    pub fn into_line_type(self, name: &str) -> Result<LineTypeRef> {
        match self {
            PropertyValue::Linetype(v) => Ok(v),
            PropertyValue::String(v) => Ok(LineTypeRef::from_name(&v)),
            _ => Err(Self::mismatch(name, "linetype")),
        }
    }

    pub fn into_line_weight(self, name: &str) -> Result<LineWeight> {
        match self {
            PropertyValue::Lineweight(v) => Ok(v),
            _ => Err(Self::mismatch(name, "lineweight")),
        }
    }

    pub fn into_transparency(self, name: &str) -> Result<Transparency> {
        match self {
            PropertyValue::Transparency(v) => Ok(v),
            _ => Err(Self::mismatch(name, "transparency")),
        }
    }
}

type Getter<E> = fn(&E) -> PropertyValue;
type Setter<E> = fn(&mut E, PropertyValue) -> Result<()>;

/// One named, typed property bound to an entity type
pub struct Property<E> {
    pub name: &'static str,
    pub kind: PropertyType,
    /// Allowed names for [`PropertyType::Enum`] properties
    pub options: &'static [&'static str],
    get: Getter<E>,
    set: Option<Setter<E>>,
}

impl<E> Property<E> {
    pub fn read_only(name: &'static str, kind: PropertyType, get: Getter<E>) -> Self {
        Property {
            name,
            kind,
            options: &[],
            get,
            set: None,
        }
    }

    pub fn editable(name: &'static str, kind: PropertyType, get: Getter<E>, set: Setter<E>) -> Self {
        Property {
            name,
            kind,
            options: &[],
            get,
            set: Some(set),
        }
    }

    pub fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub fn is_editable(&self) -> bool {
        self.set.is_some()
    }

    pub fn get(&self, entity: &E) -> PropertyValue {
        (self.get)(entity)
    }

    pub fn set(&self, entity: &mut E, value: PropertyValue) -> Result<()> {
        match self.set {
            Some(set) => set(entity, value),
            None => Err(EntityError::ReadOnlyProperty(self.name.to_string())),
        }
    }
}

impl<E> fmt::Debug for Property<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("editable", &self.is_editable())
            .finish()
    }
}

/// Named group of properties, e.g. `general` or `geometry`
#[derive(Debug)]
pub struct PropertyGroup<E> {
    pub name: &'static str,
    pub properties: Vec<Property<E>>,
}

impl<E> PropertyGroup<E> {
    pub fn find(&self, name: &str) -> Option<&Property<E>> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Full property tree of one entity type
#[derive(Debug)]
pub struct EntityProperties<E> {
    pub type_name: &'static str,
    pub groups: Vec<PropertyGroup<E>>,
}

impl<E: Entity> EntityProperties<E> {
    /// Tree holding only the `general` group
    pub fn new(type_name: &'static str) -> Self {
        let mut properties = EntityProperties {
            type_name,
            groups: Vec::new(),
        };
        properties.groups.push(general_group());
        properties
    }
}

impl<E> EntityProperties<E> {
    pub fn group(&self, name: &str) -> Option<&PropertyGroup<E>> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Append to `group`, creating it after the existing groups if needed
    pub fn add(&mut self, group: &'static str, property: Property<E>) -> &mut Self {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.properties.push(property),
            None => self.groups.push(PropertyGroup {
                name: group,
                properties: vec![property],
            }),
        }
        self
    }

    pub fn find(&self, group: &str, name: &str) -> Result<&Property<E>> {
        self.group(group)
            .and_then(|g| g.find(name))
            .ok_or_else(|| EntityError::PropertyNotFound {
                group: group.to_string(),
                name: name.to_string(),
            })
    }

    pub fn get(&self, entity: &E, group: &str, name: &str) -> Result<PropertyValue> {
        Ok(self.find(group, name)?.get(entity))
    }

    pub fn set(&self, entity: &mut E, group: &str, name: &str, value: PropertyValue) -> Result<()> {
        self.find(group, name)?.set(entity, value)
    }

    /// `(group, property)` names in display order
    pub fn names(&self) -> Vec<(&'static str, &'static str)> {
        self.groups
            .iter()
            .flat_map(|g| g.properties.iter().map(move |p| (g.name, p.name)))
            .collect()
    }
}

/// Entities that describe themselves through property groups
pub trait PropertySource: Entity + Sized {
    fn properties(&self) -> EntityProperties<Self>;
}

fn general_group<E: Entity>() -> PropertyGroup<E> {
    PropertyGroup {
        name: "general",
        properties: vec![
            Property::read_only("handle", PropertyType::String, |e: &E| {
                PropertyValue::String(e.handle().to_hex())
            }),
            Property::editable(
                "color",
                PropertyType::Color,
                |e: &E| PropertyValue::Color(e.color()),
                |e: &mut E, v| {
                    e.set_color(v.into_color("color")?);
                    Ok(())
                },
            ),
            Property::editable(
                "layer",
                PropertyType::String,
                |e: &E| PropertyValue::String(e.layer().to_string()),
                |e: &mut E, v| {
                    e.set_layer(v.into_string("layer")?);
                    Ok(())
                },
            ),
            Property::editable(
                "linetype",
                PropertyType::Linetype,
                |e: &E| PropertyValue::Linetype(e.line_type().clone()),
                |e: &mut E, v| {
                    e.set_line_type(v.into_line_type("linetype")?);
                    Ok(())
                },
            ),
            Property::editable(
                "linetypeScale",
                PropertyType::Float,
                |e: &E| PropertyValue::Float(e.linetype_scale()),
                |e: &mut E, v| {
                    e.set_linetype_scale(v.into_float("linetypeScale")?);
                    Ok(())
                },
            ),
            Property::editable(
                "lineWeight",
                PropertyType::Lineweight,
                |e: &E| PropertyValue::Lineweight(e.line_weight()),
                |e: &mut E, v| {
                    e.set_line_weight(v.into_line_weight("lineWeight")?);
                    Ok(())
                },
            ),
            Property::editable(
                "transparency",
                PropertyType::Transparency,
                |e: &E| PropertyValue::Transparency(e.transparency()),
                |e: &mut E, v| {
                    e.set_transparency(v.into_transparency("transparency")?);
                    Ok(())
                },
            ),
        ],
    }
}

/// Float property over a getter/setter pair
///
/// Expands to an editable [`Property`] whose setter converts the value
/// and calls the typed setter.
macro_rules! float_property {
    ($name:literal, $ty:ty, |$g:ident| $get:expr, |$s:ident, $v:ident| $set:expr) => {
        $crate::properties::Property::editable(
            $name,
            $crate::properties::PropertyType::Float,
            |$g: &$ty| $crate::properties::PropertyValue::Float($get),
            |$s: &mut $ty, value| {
                let $v = value.into_float($name)?;
                $set;
                Ok(())
            },
        )
    };
}
pub(crate) use float_property;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;

    #[test]
    fn test_general_group_order() {
        let line = Line::default();
        let names: Vec<_> = line
            .properties()
            .group("general")
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["handle", "color", "layer", "linetype", "linetypeScale", "lineWeight", "transparency"]
        );
    }

    #[test]
    fn test_handle_is_read_only() {
        let mut line = Line::default();
        let props = line.properties();
        let err = props
            .set(&mut line, "general", "handle", PropertyValue::String("FF".into()))
            .unwrap_err();
        assert_eq!(err, EntityError::ReadOnlyProperty("handle".into()));
    }

    #[test]
    fn test_type_mismatch() {
        let mut line = Line::default();
        let props = line.properties();
        let err = props
            .set(&mut line, "general", "color", PropertyValue::Float(1.0))
            .unwrap_err();
        assert!(matches!(err, EntityError::PropertyTypeMismatch { expected: "color", .. }));
    }

    #[test]
    fn test_missing_property() {
        let line = Line::default();
        let err = line.properties().get(&line, "text", "contents").unwrap_err();
        assert!(matches!(err, EntityError::PropertyNotFound { .. }));
    }

    #[test]
    fn test_reads_are_live() {
        let mut line = Line::default();
        let props = line.properties();
        line.set_layer("Walls".into());
        assert_eq!(
            props.get(&line, "general", "layer").unwrap(),
            PropertyValue::String("Walls".into())
        );
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(PropertyValue::Int(3).into_float("x").unwrap(), 3.0);
        assert!(PropertyValue::Float(3.0).into_int("x").is_err());
    }
}
