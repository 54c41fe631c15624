pub mod mentorship_relations;
pub mod users;
