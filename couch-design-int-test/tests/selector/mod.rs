mod selector_test;
