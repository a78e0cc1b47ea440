//! End-to-end discovery tests against mock sites

mod crawl_tests;
