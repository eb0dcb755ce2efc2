mod index_builder_test;
mod index_definition_test;
