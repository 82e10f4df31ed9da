use crate::features::categories::dtos::{CategoryResponseDto, CategoryStatsDto};
use crate::features::labels::{CatalogService, LabelCatalog};
use crate::modules::store::LabelKind;

/// The category catalog
#[derive(Debug)]
pub struct Categories;

impl LabelCatalog for Categories {
    const KIND: LabelKind = LabelKind::Category;
    type Response = CategoryResponseDto;
    type Stats = CategoryStatsDto;
}

/// Service for category operations
pub type CategoryService = CatalogService<Categories>;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::features::labels::dtos::CreateLabelDto;
    use crate::modules::store::{CatalogStore, MemoryCatalogStore, NewPrompt};

    async fn seed_prompt(store: &MemoryCatalogStore, category_ids: Vec<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        store
            .insert_prompt(NewPrompt {
                id,
                title: "t".to_string(),
                content: "c".to_string(),
                description: None,
                author_id: "u1".to_string(),
                category_ids,
                tool_ids: Vec::new(),
            })
            .await
            .unwrap();
        id
    }

    fn create_dto(name: &str) -> CreateLabelDto {
        CreateLabelDto {
            name: name.to_string(),
            description: Some(String::new()),
        }
    }

    #[tokio::test]
    async fn test_empty_description_is_absent() {
        let service = CategoryService::new(Arc::new(MemoryCatalogStore::new()));
        let category = service.create(create_dto("Writing")).await.unwrap();
        assert_eq!(category.description, None);

        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("description").is_none());
    }

    #[tokio::test]
    async fn test_delete_detaches_from_every_prompt() {
        let store = Arc::new(MemoryCatalogStore::new());
        let service = CategoryService::new(store.clone());
        let writing = service.create(create_dto("Writing")).await.unwrap();
        let coding = service.create(create_dto("Coding")).await.unwrap();

        let mut prompt_ids = Vec::new();
        for _ in 0..3 {
            prompt_ids.push(seed_prompt(&store, vec![writing.id, coding.id]).await);
        }

        assert!(service.delete(writing.id).await);

        for id in prompt_ids {
            let record = store.find_prompt(id).await.unwrap().unwrap();
            let names: Vec<&str> = record.categories.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["Coding"]);
        }
    }

    #[tokio::test]
    async fn test_stats_count_live_prompts_only() {
        let store = Arc::new(MemoryCatalogStore::new());
        let service = CategoryService::new(store.clone());
        let writing = service.create(create_dto("Writing")).await.unwrap();
        let coding = service.create(create_dto("Coding")).await.unwrap();
        let art = service.create(create_dto("Art")).await.unwrap();

        seed_prompt(&store, vec![writing.id]).await;
        seed_prompt(&store, vec![writing.id, coding.id]).await;
        let gone = seed_prompt(&store, vec![coding.id]).await;
        seed_prompt(&store, vec![coding.id]).await;
        store.soft_delete_prompt(gone).await.unwrap();

        let stats = service.stats().await.unwrap();
        let summary: Vec<(&str, i64)> = stats
            .iter()
            .map(|s| (s.category.name.as_str(), s.prompt_count))
            .collect();
        // Ties resolve alphabetically
        assert_eq!(summary, vec![("Coding", 2), ("Writing", 2), ("Art", 0)]);
        assert_eq!(stats[2].category.id, art.id);
    }
}
