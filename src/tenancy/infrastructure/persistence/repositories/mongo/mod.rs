pub mod mongo_entity_repository_impl;
