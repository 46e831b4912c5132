mod shell;
pub use shell::Shell;

mod search;
pub use search::Search;

mod profile;
pub use profile::Profile;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod list_detail;
pub use list_detail::ListDetail;
