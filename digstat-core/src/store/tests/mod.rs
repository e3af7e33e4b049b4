mod memory_tests;
mod redis_tests;
