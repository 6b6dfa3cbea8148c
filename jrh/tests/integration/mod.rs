mod convert_tests;
mod orchestrator_tests;
