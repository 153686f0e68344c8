/// A read model the repository can persist.
///
/// # Purpose
/// Exposes the identifier the repository keys documents by, and the class
/// tag the repository checks before every write.
///
/// # Characteristics
/// - `id()` returns the string form of the identifier; the stored `_id` is
///   always this string
/// - `model_class()` is the canonical tag of the type
/// - `class_name()` is the tag of one instance and defaults to
///   `model_class()`; an enum read model may report one tag per variant
///
/// Usually implemented with `#[derive(Identifiable)]` from `readmodel_derive`.
///
/// # Usage
/// ```ignore
/// #[derive(Identifiable, Serialize, Deserialize)]
/// #[read_model(class = "Order")]
/// pub struct OrderView {
///     id: String,
///     total: i64,
/// }
/// ```
pub trait Identifiable {
    fn model_class() -> String
    where
        Self: Sized;

    fn id(&self) -> String;

    fn class_name(&self) -> String
    where
        Self: Sized,
    {
        Self::model_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        id: u32,
    }

    impl Identifiable for Plain {
        fn model_class() -> String {
            "Plain".to_string()
        }

        fn id(&self) -> String {
            self.id.to_string()
        }
    }

    enum Shape {
        Circle(String),
        Square(String),
    }

    impl Identifiable for Shape {
        fn model_class() -> String {
            "Shape".to_string()
        }

        fn id(&self) -> String {
            match self {
                Shape::Circle(id) | Shape::Square(id) => id.clone(),
            }
        }

        fn class_name(&self) -> String {
            match self {
                Shape::Circle(_) => "Circle".to_string(),
                Shape::Square(_) => "Square".to_string(),
            }
        }
    }

    #[test]
    fn test_class_name_defaults_to_model_class() {
        let plain = Plain { id: 7 };
        assert_eq!(plain.class_name(), "Plain");
        assert_eq!(plain.id(), "7");
    }

    #[test]
    fn test_class_name_can_vary_per_instance() {
        assert_eq!(Shape::Circle("c".to_string()).class_name(), "Circle");
        assert_eq!(Shape::Square("s".to_string()).class_name(), "Square");
        assert_eq!(Shape::model_class(), "Shape");
    }
}
