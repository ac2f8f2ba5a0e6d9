use model_registry::Model;

#[derive(Default, Model)]
pub struct SampleModel {
    #[model(primary_key, column = "id")]
    id: i64,
    name: String,
    description: String,
}

fn main() {
    assert_eq!(SampleModel::model_name(), "SampleModel");
    assert_eq!(SampleModel::field_declarations().len(), 3);
}
