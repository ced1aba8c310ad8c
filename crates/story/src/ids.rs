use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(StoryId);
uuid_id!(
    /// Identifies a node within its story.
    StoryNodeId
);
uuid_id!(
    /// Identifies an annotation in `Story::annotations`; nodes refer to
    /// annotations only through this id.
    AnnotationId
);

#[cfg(test)]
mod tests {
    use super::{AnnotationId, StoryNodeId};

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(StoryNodeId::new(), StoryNodeId::new());
    }

    #[test]
    fn ids_serialize_as_bare_uuid_strings() {
        let id = AnnotationId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.0));

        // Documents written by other tools use upper-case UUIDs.
        let upper = json.to_uppercase();
        let back: AnnotationId = serde_json::from_str(&upper).expect("deserialize");
        assert_eq!(back, id);
    }
}
