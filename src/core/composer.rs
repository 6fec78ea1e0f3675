/// Category composers: one fixed sampling recipe per prompt category.
///
/// A composer reads only the catalog and the random source it is handed and
/// returns the concatenation of its draws in recipe order. Any sampling
/// failure aborts the whole composition.

use rand::RngCore;

use crate::core::catalog::Catalog;
use crate::core::sampling::{
    draw_escalating, pick_from, pick_variant, probabilistic_include, select_independent,
    uniform_pick, weighted_pick, SamplingError,
};
use crate::schema::category::Category;
use crate::schema::pool::{Source, TagPool, WeightedSource};

/// Signature shared by every category recipe.
pub type Composer = fn(&Catalog, &mut dyn RngCore) -> Result<Vec<String>, SamplingError>;

/// The composer registered for a category.
pub fn composer_for(category: Category) -> Composer {
    match category {
        Category::Animals => compose_animals,
        Category::Nature => compose_nature,
        Category::Sceneries => compose_sceneries,
        Category::Clothes => compose_clothes,
        Category::Objects => compose_objects,
        Category::Actions => compose_actions,
        Category::People => compose_people,
        Category::Fantasy => compose_fantasy,
        Category::HairStyles => compose_hair_styles,
        Category::Expressions => compose_expressions,
    }
}

/// Run the recipe for `category` against `catalog`.
pub fn compose(
    category: Category,
    catalog: &Catalog,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>, SamplingError> {
    composer_for(category)(catalog, rng)
}

/// Owned tags accumulated in draw order.
#[derive(Debug, Default)]
struct TagList(Vec<String>);

impl TagList {
    fn push(&mut self, tag: &str) {
        self.0.push(tag.to_owned());
    }

    fn extend<'a>(&mut self, tags: impl IntoIterator<Item = &'a str>) {
        self.0.extend(tags.into_iter().map(str::to_owned));
    }

    fn finish(self) -> Vec<String> {
        self.0
    }
}

/// Draw one tag per pool for each pool whose probability roll succeeds.
fn include_each(
    tags: &mut TagList,
    inclusions: &[(&TagPool, f64)],
    rng: &mut dyn RngCore,
) -> Result<(), SamplingError> {
    for &(pool, probability) in inclusions {
        tags.extend(probabilistic_include(pool, probability, rng)?);
    }
    Ok(())
}

fn compose_animals(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let mut tags = TagList::default();
    tags.extend(select_independent(&catalog.defaults.animals, rng)?);
    tags.extend(draw_escalating(&catalog.animals.names, &[0.25, 0.1], rng)?);
    tags.push(weighted_pick(
        &[
            WeightedSource::new(&catalog.locations.natural, 0.9),
            WeightedSource::new(&catalog.locations.urban, 0.1),
        ],
        rng,
    )?);
    tags.extend(probabilistic_include(&catalog.nature.phenomena, 0.5, rng)?);
    Ok(tags.finish())
}

fn compose_nature(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let mut tags = TagList::default();
    tags.extend(select_independent(&catalog.defaults.nature, rng)?);
    tags.extend(draw_escalating(
        &catalog.locations.natural,
        &[0.75, 0.5, 0.25],
        rng,
    )?);
    include_each(
        &mut tags,
        &[
            (&catalog.nature.plants_flowers, 0.75),
            (&catalog.animals.names, 0.5),
            (&catalog.nature.phenomena, 0.5),
        ],
        rng,
    )?;
    Ok(tags.finish())
}

fn compose_sceneries(
    catalog: &Catalog,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>, SamplingError> {
    let settings = TagPool::union(&[&catalog.locations.natural, &catalog.locations.urban]);

    let mut tags = TagList::default();
    tags.extend(select_independent(&catalog.defaults.sceneries, rng)?);
    tags.extend(draw_escalating(&settings, &[1.0, 0.75, 0.5], rng)?);
    include_each(
        &mut tags,
        &[
            (&catalog.objects.misc, 0.1),
            (&catalog.nature.plants_flowers, 0.5),
        ],
        rng,
    )?;
    Ok(tags.finish())
}

fn compose_clothes(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let clothing = &catalog.clothing;
    let mut tags = TagList::default();
    include_each(
        &mut tags,
        &[
            (&clothing.dresses_and_skirts, 0.5),
            (&clothing.inners, 1.0),
            (&clothing.outers, 1.0),
            (&clothing.bottoms, 1.0),
            (&clothing.footwear, 0.8),
            (&clothing.headwear, 0.75),
            (&clothing.sleeves, 0.5),
            (&clothing.accessories, 1.0),
            (&clothing.special_costumes, 0.25),
            (&clothing.fabrics_and_patterns, 0.25),
        ],
        rng,
    )?;
    Ok(tags.finish())
}

fn compose_objects(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let mut tags = TagList::default();
    tags.extend(draw_escalating(&catalog.objects.misc, &[0.75, 0.5, 0.25], rng)?);
    Ok(tags.finish())
}

fn compose_actions(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let actions = &catalog.actions;
    let mut tags = TagList::default();
    tags.push(uniform_pick(&actions.basic, rng)?);
    tags.push(uniform_pick(&actions.poses, rng)?);
    include_each(
        &mut tags,
        &[
            (&actions.hands_and_arms, 0.75),
            (&actions.legs_and_feet, 0.75),
            (&actions.head, 0.5),
            (&actions.with_others, 0.5),
            (&actions.with_objects, 0.5),
            (&actions.angles, 0.25),
        ],
        rng,
    )?;
    Ok(tags.finish())
}

fn compose_people(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let body_language = TagPool::union(&[&catalog.actions.basic, &catalog.actions.poses]);

    let mut tags = TagList::default();
    tags.push(uniform_pick(&catalog.people.basic, rng)?);
    tags.push(uniform_pick(&catalog.people.occupations, rng)?);
    tags.push(uniform_pick(&catalog.hair.style, rng)?);
    tags.push(uniform_pick(&catalog.hair.length, rng)?);
    tags.push(uniform_pick(&catalog.hair.color, rng)?);
    tags.push(pick_from(Source::Group(&catalog.expressions), rng)?);
    tags.push(weighted_pick(
        &[
            WeightedSource::new(&catalog.locations.indoors, 0.25),
            WeightedSource::new(&catalog.locations.urban, 0.75),
        ],
        rng,
    )?);

    include_each(
        &mut tags,
        &[
            (&catalog.hair.accessories, 0.5),
            (&catalog.hair.other, 0.25),
            (&catalog.eyes.color, 0.75),
            (&catalog.eyes.eyewear, 0.1),
            (&body_language, 0.25),
            (&catalog.clothing.inners, 0.25),
            (&catalog.clothing.outers, 0.25),
            (&catalog.clothing.bottoms, 0.25),
            (&catalog.clothing.footwear, 0.5),
            (&catalog.clothing.headwear, 0.25),
            (&catalog.clothing.accessories, 0.1),
        ],
        rng,
    )?;
    Ok(tags.finish())
}

fn compose_fantasy(catalog: &Catalog, rng: &mut dyn RngCore) -> Result<Vec<String>, SamplingError> {
    let mut tags = TagList::default();
    tags.push(weighted_pick(
        &[
            WeightedSource::new(&catalog.people.basic, 0.25),
            WeightedSource::new(&catalog.animals.names, 0.75),
        ],
        rng,
    )?);
    include_each(
        &mut tags,
        &[
            (&catalog.eyes.features_conditions, 0.1),
            (&catalog.eyes.pupils_sclera, 0.25),
        ],
        rng,
    )?;
    tags.extend(draw_escalating(&catalog.animals.features, &[0.5, 0.25, 0.1], rng)?);
    tags.extend(draw_escalating(
        &catalog.people.fantasy_and_mythical,
        &[0.5, 0.25, 0.1],
        rng,
    )?);
    Ok(tags.finish())
}

fn compose_hair_styles(
    catalog: &Catalog,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>, SamplingError> {
    let hair = &catalog.hair;
    let mut tags = TagList::default();
    tags.extend(select_independent(&catalog.defaults.hair_styles, rng)?);
    tags.push(uniform_pick(&hair.style, rng)?);
    tags.push(uniform_pick(&hair.length, rng)?);
    tags.push(uniform_pick(&hair.color, rng)?);
    tags.extend(probabilistic_include(&hair.accessories, 0.75, rng)?);
    Ok(tags.finish())
}

fn compose_expressions(
    catalog: &Catalog,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>, SamplingError> {
    let mut tags = TagList::default();
    tags.extend(select_independent(&catalog.defaults.expressions, rng)?);
    tags.push(uniform_pick(&catalog.people.basic, rng)?);
    let variant = pick_variant(&catalog.expressions, rng)?;
    tags.push(uniform_pick(&variant.tags, rng)?);
    Ok(tags.finish())
}
