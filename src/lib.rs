pub mod configuration;

pub mod concurrent {
    pub mod synchronizedtabulatedfunction;
    pub mod multiplyingtask;
    pub mod readwritetask;
}

pub mod functions {
    pub mod point;
    pub mod functionerror;
    pub mod mathfunction;
    pub mod simplefunctions;
    pub mod tabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod linkedlisttabulatedfunction;
    pub mod unmodifiabletabulatedfunction;

    pub mod factory {
        pub mod tabulatedfunctionfactory;
        pub mod arraytabulatedfunctionfactory;
        pub mod linkedlisttabulatedfunctionfactory;
    }
}

pub mod operations {
    pub mod differentialoperator;
    pub mod steppingdifferentialoperator;
    pub mod tabulateddifferentialoperator;
    pub mod tabulatedfunctionoperationservice;
}
