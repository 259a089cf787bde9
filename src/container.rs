/// Contenedor de un ingrediente. Lleva las unidades disponibles, las reservadas
/// por pedidos en preparacion y las ya consumidas.
#[derive(Debug, Default)]
pub struct Container {
    pub remaining: u64,
    pub reserved: u64,
    pub consumed: u64,
}

impl Container {
    pub fn new(initial_capacity: u64) -> Container {
        Container {
            remaining: initial_capacity,
            reserved: 0,
            consumed: 0,
        }
    }

    pub fn has(&self, quantity: u64) -> bool {
        self.remaining >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_a_container_with_its_initial_capacity() {
        let container = Container::new(20);
        assert_eq!(20, container.remaining);
        assert_eq!(0, container.reserved);
        assert_eq!(0, container.consumed);
    }

    #[test]
    fn should_have_up_to_the_remaining_quantity() {
        let container = Container::new(2);
        assert_eq!(true, container.has(2));
        assert_eq!(false, container.has(3));
    }
}
