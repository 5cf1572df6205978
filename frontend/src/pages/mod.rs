mod home;
pub use home::Page as Home;

mod example;
pub use example::Page as Example;
