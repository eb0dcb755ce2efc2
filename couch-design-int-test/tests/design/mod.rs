mod builder_test;
mod design_document_test;
