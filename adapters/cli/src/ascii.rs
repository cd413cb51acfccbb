use std::collections::HashSet;

use anyhow::{Context, Result as AnyResult};
use tallgrass_core::{AreaCoordinate, SpeciesId};
use tallgrass_rendering::{
    ActorPresentation, FeaturePresentation, GridPresentation, PanelPresentation, RenderGroup,
    Renderer, SpriteKey,
};

const EMPTY_CELL: char = '.';
const ACTOR_CELL: char = '@';

/// Renderer that draws each frame as a block of text, one character per tile.
#[derive(Debug, Default)]
pub(crate) struct AsciiRenderer {
    grid: Option<GridPresentation>,
    cells: Vec<char>,
    hidden: HashSet<RenderGroup>,
    header: String,
    footer: Vec<String>,
    frame: String,
}

impl AsciiRenderer {
    /// Creates a renderer with an empty frame.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Text of the last completed frame.
    #[must_use]
    pub(crate) fn frame(&self) -> &str {
        &self.frame
    }

    fn set_cell(&mut self, position: glam::Vec2, glyph: char) {
        let Some(grid) = self.grid else {
            return;
        };
        if let Some(tile) = grid.tile_at(position) {
            let index = tile.row() as usize * grid.columns as usize + tile.column() as usize;
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = glyph;
            }
        }
    }
}

fn glyph(sprite: SpriteKey) -> char {
    match sprite {
        SpriteKey::PathStraight => '=',
        SpriteKey::PathCorner => '+',
        SpriteKey::Grass => '"',
        SpriteKey::Tree => 'T',
        SpriteKey::Rock(_) => 'o',
    }
}

impl Renderer for AsciiRenderer {
    fn begin_frame(&mut self, area: AreaCoordinate, grid: &GridPresentation) -> AnyResult<()> {
        self.grid = Some(*grid);
        self.cells = vec![EMPTY_CELL; grid.columns as usize * grid.rows as usize];
        self.hidden.clear();
        self.header = format!("area {area}");
        self.footer.clear();
        Ok(())
    }

    fn set_group_visible(&mut self, group: RenderGroup, visible: bool) -> AnyResult<()> {
        if visible {
            let _ = self.hidden.remove(&group);
        } else {
            let _ = self.hidden.insert(group);
        }
        Ok(())
    }

    fn place_feature(&mut self, feature: &FeaturePresentation) -> AnyResult<()> {
        let Some(grid) = self.grid else {
            return Ok(());
        };
        if self.hidden.contains(&feature.group) {
            return Ok(());
        }
        let center = feature.tile.center(grid.tile_length);
        self.set_cell(glam::Vec2::new(center.x, center.y), glyph(feature.sprite));
        Ok(())
    }

    fn draw_actor(&mut self, actor: &ActorPresentation) -> AnyResult<()> {
        if !self.hidden.contains(&RenderGroup::Actor) {
            self.set_cell(actor.position, ACTOR_CELL);
        }
        Ok(())
    }

    fn draw_battle_sprite(&mut self, species: &SpeciesId) -> AnyResult<()> {
        if !self.hidden.contains(&RenderGroup::Overlay) {
            self.footer.push(format!("battle: {species}"));
        }
        Ok(())
    }

    fn present_panel(&mut self, panel: &PanelPresentation) -> AnyResult<()> {
        self.footer.push(format!("panel: {:?}", panel.mode));
        for (index, entry) in panel.entries.iter().enumerate() {
            let marker = if entry.enabled { ' ' } else { '-' };
            self.footer.push(format!(" {marker}{}. {}", index + 1, entry.label));
        }
        if let Some(message) = &panel.message {
            self.footer.push(format!("> {message}"));
        }
        Ok(())
    }

    fn end_frame(&mut self) -> AnyResult<()> {
        let grid = self.grid.context("end_frame called before begin_frame")?;
        let columns = (grid.columns as usize).max(1);

        let mut frame = String::new();
        frame.push_str(&self.header);
        frame.push('\n');
        for row in self.cells.chunks(columns) {
            frame.extend(row.iter());
            frame.push('\n');
        }
        for line in &self.footer {
            frame.push_str(line);
            frame.push('\n');
        }
        self.frame = frame;
        Ok(())
    }
}
