mod articles;
mod edit;
pub mod mock;

pub use self::{
    articles::{Article, Counter, Status, parse_datetime},
    edit::{ArticleEdit, ValidationErrors},
};
