use model_registry::Model;

#[derive(Model)]
pub struct Article {
    #[model(table = "articles")]
    #[model(primary_key = true)]
    article_id: i64,
    #[model(column = "-")]
    cached_html: String,
    #[model(primary_key = 0)]
    revision: i64,
    #[model(soft_delete = "1")]
    removed_at: Option<String>,
}

fn main() {}
