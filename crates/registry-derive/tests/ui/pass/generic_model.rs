use model_registry::Model;

#[derive(Model)]
pub struct Tagged<T: Send + Sync + 'static> {
    #[model(primary_key)]
    id: i64,
    payload: T,
}

fn main() {
    assert_eq!(<Tagged<String> as Model>::model_name(), "Tagged");
}
