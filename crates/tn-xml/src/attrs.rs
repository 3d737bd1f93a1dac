//! Attribute access for elements read with `quick-xml`.

use std::collections::HashMap;
use std::str::FromStr;

use quick_xml::events::BytesStart;

use tn_core::Point;

use crate::{XmlError, XmlResult};

/// Unescaped attributes of one element, keyed by name.
pub(crate) struct Attrs {
    element: String,
    values:  HashMap<String, String>,
}

impl Attrs {
    pub(crate) fn of(start: &BytesStart<'_>) -> XmlResult<Self> {
        let element = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut values = HashMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            values.insert(key, attr.unescape_value()?.into_owned());
        }
        Ok(Self { element, values })
    }

    pub(crate) fn element(&self) -> &str {
        &self.element
    }

    pub(crate) fn get(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub(crate) fn req(&self, attribute: &'static str) -> XmlResult<&str> {
        self.get(attribute).ok_or_else(|| XmlError::MissingAttribute {
            element: self.element.clone(),
            attribute,
        })
    }

    pub(crate) fn string(&self, attribute: &'static str) -> XmlResult<String> {
        self.req(attribute).map(str::to_owned)
    }

    pub(crate) fn num<T: FromStr>(&self, attribute: &'static str) -> XmlResult<T> {
        let value = self.req(attribute)?;
        value.parse().map_err(|_| self.parse_error(attribute, value))
    }

    pub(crate) fn opt_num<T: FromStr>(&self, attribute: &'static str) -> XmlResult<Option<T>> {
        match self.get(attribute) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| self.parse_error(attribute, value)),
        }
    }

    /// Space-separated list; missing or empty yields an empty list.
    pub(crate) fn list(&self, attribute: &'static str) -> Vec<String> {
        self.get(attribute)
            .map(|v| v.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// `x,y x,y ...` shape; missing or empty yields no points.
    pub(crate) fn shape(&self, attribute: &'static str) -> XmlResult<Vec<Point>> {
        let Some(value) = self.get(attribute) else {
            return Ok(Vec::new());
        };
        value
            .split_whitespace()
            .map(|pair| {
                let (x, y) = pair.split_once(',').ok_or_else(|| self.parse_error(attribute, pair))?;
                match (x.parse(), y.parse()) {
                    (Ok(x), Ok(y)) => Ok(Point::new(x, y)),
                    _ => Err(self.parse_error(attribute, pair)),
                }
            })
            .collect()
    }

    fn parse_error(&self, attribute: &'static str, value: &str) -> XmlError {
        XmlError::Parse { element: self.element.clone(), attribute, value: value.to_owned() }
    }
}

/// Render points as `x,y x,y ...`.
pub(crate) fn format_shape(points: &[Point]) -> String {
    points.iter().map(Point::to_string).collect::<Vec<_>>().join(" ")
}
