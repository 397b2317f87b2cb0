use crate::core::dataset::{AttributeKind, AttributeSpec};
use crate::error::SliqError;

/// Attribute names and kinds as declared by the dataset, plus the class column.
///
/// Declaration order is significant: it is the order in which attributes are
/// scanned and the order that breaks ties between equally good splits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHeader {
    attributes: Vec<AttributeSpec>,
    class_index: usize,
}

impl DatasetHeader {
    /// Builds a header, marking the attribute at `class_index` as the class.
    pub fn new(mut attributes: Vec<AttributeSpec>, class_index: usize) -> Result<Self, SliqError> {
        if class_index >= attributes.len() {
            return Err(SliqError::InvalidParameter(format!(
                "class index {class_index} is out of range for {} attributes",
                attributes.len()
            )));
        }
        for (i, attr) in attributes.iter_mut().enumerate() {
            if i == class_index {
                attr.kind = AttributeKind::Class;
            } else if attr.kind == AttributeKind::Class {
                return Err(SliqError::InvalidParameter(format!(
                    "attribute '{}' is marked as class but the class index is {class_index}",
                    attr.name
                )));
            }
        }
        Ok(Self {
            attributes,
            class_index,
        })
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> &AttributeSpec {
        &self.attributes[self.class_index]
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&AttributeSpec> {
        self.attributes.get(index)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Numeric attributes in declaration order.
    pub fn numeric_attributes(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.iter().filter(|a| a.is_numeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_header() -> DatasetHeader {
        DatasetHeader::new(
            vec![
                AttributeSpec::numeric("buying"),
                AttributeSpec::categorical("lug_boot"),
                AttributeSpec::numeric("doors"),
                AttributeSpec::categorical("class"),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn class_column_is_forced_to_class_kind() {
        let h = car_header();
        assert_eq!(h.class_attribute().name, "class");
        assert_eq!(h.class_attribute().kind, AttributeKind::Class);
        assert_eq!(h.class_index(), 3);
    }

    #[test]
    fn numeric_attributes_keep_declaration_order() {
        let h = car_header();
        let names: Vec<&str> = h.numeric_attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["buying", "doors"]);
    }

    #[test]
    fn class_column_is_never_numeric() {
        let h = DatasetHeader::new(
            vec![AttributeSpec::numeric("x"), AttributeSpec::numeric("y")],
            1,
        )
        .unwrap();
        let names: Vec<&str> = h.numeric_attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn lookup_by_name_and_index() {
        let h = car_header();
        assert_eq!(h.index_of_attribute("doors"), Some(2));
        assert_eq!(h.index_of_attribute("color"), None);
        assert_eq!(h.attribute_at_index(1).unwrap().name, "lug_boot");
        assert!(h.attribute_at_index(9).is_none());
        assert_eq!(h.number_of_attributes(), 4);
    }

    #[test]
    fn class_index_out_of_range_is_rejected() {
        let err = DatasetHeader::new(vec![AttributeSpec::numeric("x")], 1).unwrap_err();
        assert!(matches!(err, SliqError::InvalidParameter(_)));
    }

    #[test]
    fn second_class_column_is_rejected() {
        let err = DatasetHeader::new(
            vec![AttributeSpec::class("a"), AttributeSpec::categorical("b")],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, SliqError::InvalidParameter(_)));
    }
}
