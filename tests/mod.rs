mod client_http;
mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Calendar, filter and grading behaviour through the public API
// - api_mock: Repositories and commands against an in-process API double
// - cache_mock: Fallback cache behaviour when the cache itself fails
// - client_http: The HTTP client against a mock server
