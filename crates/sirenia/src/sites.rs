//! The working polyline: a doubly linked list of sites stored in an arena.
//!
//! Sites are never freed while the list lives; unlinking a site only rewires its neighbours.

use crate::geom::{self, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(usize);

impl SiteId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub point: Point,
    prev: Option<SiteId>,
    next: Option<SiteId>,
    /// Fit coefficient of the Bezier fitted at this site, toward the previous site.
    pub previous_fit_coefficient: f64,
    /// Fit coefficient of the Bezier fitted at this site, toward the next site.
    pub next_fit_coefficient: f64,
}

impl Site {
    fn new(point: Point) -> Self {
        Self {
            point,
            prev: None,
            next: None,
            previous_fit_coefficient: 0.0,
            next_fit_coefficient: 0.0,
        }
    }

    pub fn prev(&self) -> Option<SiteId> {
        self.prev
    }

    pub fn next(&self) -> Option<SiteId> {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteList {
    sites: Vec<Site>,
    head: SiteId,
    tail: SiteId,
}

impl SiteList {
    pub fn new(first: Point) -> Self {
        Self {
            sites: vec![Site::new(first)],
            head: SiteId(0),
            tail: SiteId(0),
        }
    }

    /// `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut list = Self::new(first);
        for &p in rest {
            list.push_back(p);
        }
        Some(list)
    }

    pub fn head(&self) -> SiteId {
        self.head
    }

    pub fn tail(&self) -> SiteId {
        self.tail
    }

    pub fn site(&self, id: SiteId) -> &Site {
        &self.sites[id.0]
    }

    pub fn site_mut(&mut self, id: SiteId) -> &mut Site {
        &mut self.sites[id.0]
    }

    pub fn point(&self, id: SiteId) -> Point {
        self.sites[id.0].point
    }

    pub fn next(&self, id: SiteId) -> Option<SiteId> {
        self.sites[id.0].next
    }

    pub fn prev(&self, id: SiteId) -> Option<SiteId> {
        self.sites[id.0].prev
    }

    pub fn push_back(&mut self, point: Point) -> SiteId {
        let tail = self.tail;
        self.insert_after(tail, point)
    }

    /// Links a new site between `after` and its current successor.
    pub fn insert_after(&mut self, after: SiteId, point: Point) -> SiteId {
        let id = SiteId(self.sites.len());
        let next = self.sites[after.0].next;
        let mut site = Site::new(point);
        site.prev = Some(after);
        site.next = next;
        self.sites.push(site);
        self.sites[after.0].next = Some(id);
        match next {
            Some(n) => self.sites[n.0].prev = Some(id),
            None => self.tail = id,
        }
        id
    }

    /// Unlinks an interior site. Endpoints stay in place and `false` is returned for them.
    pub fn unlink(&mut self, id: SiteId) -> bool {
        let (Some(prev), Some(next)) = (self.prev(id), self.next(id)) else {
            return false;
        };
        self.sites[prev.0].next = Some(next);
        self.sites[next.0].prev = Some(prev);
        let site = &mut self.sites[id.0];
        site.prev = None;
        site.next = None;
        true
    }

    pub fn iter(&self) -> SiteIter<'_> {
        SiteIter {
            list: self,
            cur: Some(self.head),
        }
    }

    pub fn points(&self) -> Vec<Point> {
        self.iter().map(|id| self.point(id)).collect()
    }

    /// Number of linked sites; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Sign of the turn at `id`; `0` at either end or where the polyline runs straight.
    pub fn turn(&self, id: SiteId) -> i8 {
        match (self.prev(id), self.next(id)) {
            (Some(p), Some(n)) => geom::turn_sign(self.point(p), self.point(id), self.point(n)),
            _ => 0,
        }
    }

    /// Unlinks straight-through sites, repeating until a pass removes none.
    pub fn remove_flat_sites(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let mut progress = false;
            let mut cur = self.next(self.head);
            while let Some(s) = cur {
                cur = self.next(s);
                if cur.is_some() && self.turn(s) == 0 && self.unlink(s) {
                    removed += 1;
                    progress = true;
                }
            }
            if !progress {
                return removed;
            }
        }
    }

    /// The next corner after `a`: its two following sites, when both exist.
    pub fn find_corner(&self, a: SiteId) -> Option<(SiteId, SiteId)> {
        let b = self.next(a)?;
        let c = self.next(b)?;
        Some((b, c))
    }

    /// The same geometry traversed from the tail. Fit coefficients swap direction.
    pub fn reversed(&self) -> SiteList {
        let mut ids = self.iter().collect::<Vec<_>>().into_iter().rev();
        let Some(first) = ids.next() else {
            return self.clone();
        };
        let mut list = Self::new(self.point(first));
        let copy_coefficients = |list: &mut SiteList, to: SiteId, from: &Site| {
            let site = list.site_mut(to);
            site.previous_fit_coefficient = from.next_fit_coefficient;
            site.next_fit_coefficient = from.previous_fit_coefficient;
        };
        let head = list.head;
        copy_coefficients(&mut list, head, self.site(first));
        for id in ids {
            let new_id = list.push_back(self.point(id));
            copy_coefficients(&mut list, new_id, self.site(id));
        }
        list
    }
}

pub struct SiteIter<'a> {
    list: &'a SiteList,
    cur: Option<SiteId>,
}

impl Iterator for SiteIter<'_> {
    type Item = SiteId;

    fn next(&mut self) -> Option<SiteId> {
        let id = self.cur?;
        self.cur = self.list.next(id);
        Some(id)
    }
}
