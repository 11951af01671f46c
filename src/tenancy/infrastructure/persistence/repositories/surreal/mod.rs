pub mod surreal_entity_repository_impl;
