mod registry_handle_tests;
