use catalog_core::ports::Application;
use catalog_sqlite::Db;

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}
