//! Integration tests and simulation for the denomination factory.


#[cfg(test)]
mod genesis_tests;
#[cfg(test)]
mod msg_tests;
#[cfg(test)]
mod property_tests;
